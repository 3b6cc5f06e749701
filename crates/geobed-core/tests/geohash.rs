mod common;

use common::{catalog, swiss_cities};
use geobed_core::spatial::{encode_clamped, UNSET_HASH};
use geobed_core::{resolve, City, GeohashEncoder, Resolver, SpatialEncoder, HASH_LEN};
use std::thread;

#[test]
fn encoder_emits_full_length_hashes() {
    let encoder = GeohashEncoder::new();
    for (lat, lon) in [(47.37, 8.54), (-33.87, 151.21), (64.14, -21.94), (-89.9, 179.9)] {
        let hash = encoder.encode(lat, lon).unwrap();
        assert_eq!(hash.len(), HASH_LEN, "{hash} for ({lat}, {lon})");
    }
    assert_eq!(encoder.unset_sentinel().len(), HASH_LEN);
}

#[test]
fn sentinel_is_the_hash_of_the_origin() {
    let encoder = GeohashEncoder::new();
    assert_eq!(encoder.unset_sentinel(), UNSET_HASH);
    assert_eq!(encoder.encode(0.0, 0.0).as_deref(), Some(UNSET_HASH));
    assert_eq!(encode_clamped(0.0, 0.0).as_deref(), Some(UNSET_HASH));
}

#[test]
fn origin_is_treated_as_unset() {
    let mut cities = swiss_cities();
    cities.push(City::new("Null Island", "XX", 0.0, 0.0).unwrap());
    let cat = catalog(cities);

    assert!(resolve(&cat, 0.0, 0.0).is_none());
}

#[test]
fn resolves_to_nearby_city() {
    let cat = catalog(swiss_cities());

    assert_eq!(resolve(&cat, 47.37, 8.54).unwrap().name(), "Zurich");
    assert_eq!(resolve(&cat, 46.20, 6.15).unwrap().name(), "Geneva");
    assert_eq!(resolve(&cat, 46.01, 8.96).unwrap().name(), "Lugano");
}

#[test]
fn exact_city_coordinate_returns_that_city() {
    let cat = catalog(swiss_cities());
    for city in cat.cities() {
        let hit = resolve(&cat, city.latitude(), city.longitude()).unwrap();
        assert_eq!(hit.name(), city.name());
    }
}

#[test]
fn far_away_query_is_not_found() {
    let cat = catalog(swiss_cities());
    // Sydney shares no coarse cell with Switzerland.
    assert!(resolve(&cat, -33.87, 151.21).is_none());
}

#[test]
fn nan_and_out_of_range_never_panic() {
    let cat = catalog(swiss_cities());
    assert!(resolve(&cat, f64::NAN, 8.5).is_none());
    assert!(resolve(&cat, 47.0, f64::NAN).is_none());

    // Out-of-range input is clamped, not rejected.
    assert_eq!(encode_clamped(95.0, 200.0), encode_clamped(90.0, 180.0));
    let _ = resolve(&cat, 1_000.0, -1_000.0);
    let _ = resolve(&cat, f64::INFINITY, f64::NEG_INFINITY);
}

#[test]
fn catalog_shorthand_matches_resolver() {
    let cat = catalog(swiss_cities());
    let resolver = Resolver::new(&cat);
    let a = resolver.resolve(46.95, 7.45).map(|c| c.name().to_string());
    let b = cat.reverse_geocode(46.95, 7.45).map(|c| c.name().to_string());
    assert_eq!(a, b);
    assert_eq!(a.as_deref(), Some("Bern"));
}

#[test]
fn shared_catalog_across_threads() {
    let cat = catalog(swiss_cities());
    let resolver = Resolver::new(&cat);

    thread::scope(|s| {
        let handles: Vec<_> = (0..8)
            .map(|_| s.spawn(|| resolver.resolve(47.37, 8.54).map(|c| c.name().to_string())))
            .collect();
        for h in handles {
            assert_eq!(h.join().unwrap().as_deref(), Some("Zurich"));
        }
    });
}

#[test]
fn country_join() {
    let cat = catalog(swiss_cities());
    let city = resolve(&cat, 47.37, 8.54).unwrap();
    let country = cat.country_of(city).unwrap();
    assert_eq!(country.name(), "Switzerland");
    assert_eq!(cat.find_country_by_code("che").unwrap().iso2(), "CH");
    assert!(cat.find_country_by_code("XX").is_none());
}
