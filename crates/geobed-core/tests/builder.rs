#![cfg(feature = "builder")]

use geobed_core::loader::builder::{
    assemble, build_assets, parse_admin1, parse_cities, parse_countries, GeoNamesSources,
};
use geobed_core::{Catalog, DefaultBackend};
use std::collections::HashMap;
use std::fs;
use std::io::Cursor;
use tempfile::tempdir;

// geonameid name asciiname alternatenames lat lon fclass fcode cc cc2 admin1 admin2 admin3 admin4 population elevation dem tz modified
const CITIES: &str = "\
2657896\tZürich\tZurich\tTuricum,Zuerich\t47.36667\t8.55\tP\tPPLA\tCH\t\tZH\t112\t261\t\t341730\t\t429\tEurope/Zurich\t2023-01-01
2660646\tGeneva\tGeneva\tGeneve,Genf\t46.20222\t6.14569\tP\tPPLA\tCH\t\tGE\t2500\t6621\t\t183981\t\t375\tEurope/Zurich\t2023-01-01
2661552\tBern\tBern\tBerne\t46.94809\t7.44744\tP\tPPLC\tCH\t\tBE\t246\t351\t\t121631\t\t542\tEurope/Zurich\t2023-01-01
2659836\tLugano\tLugano\t\t46.01008\t8.96004\tP\tPPLA3\tCH\t\tTI\t2105\t5192\t\t63185\t\t273\tEurope/Zurich\t2023-01-01
9999999\tBroken\tBroken\t\tnot-a-number\t8.0\tP\tPPL\tCH\t\tZH\t\t\t\t10\t\t0\tEurope/Zurich\t2023-01-01
";

const COUNTRIES: &str = "\
# GeoNames countryInfo
#ISO\tISO3\tISO-Numeric\tfips\tCountry\tCapital\tArea(in sq km)\tPopulation\tContinent\ttld\tCurrencyCode\tCurrencyName\tPhone\tPostal Code Format\tPostal Code Regex\tLanguages\tgeonameid\tneighbours\tEquivalentFipsCode
CH\tCHE\t756\tSZ\tSwitzerland\tBern\t41290\t8516543\tEU\t.ch\tCHF\tFranc\t41\t####\t^(\\d{4})$\tde-CH,fr-CH,it-CH,rm\t2658434\tDE,IT,LI,FR,AT\t
LI\tLIE\t438\tLS\tLiechtenstein\tVaduz\t160\t37910\tEU\t.li\tCHF\tFranc\t423\t####\t^(\\d{4})$\tde-LI\t3042058\tCH,AT\t
";

const ADMIN1: &str = "\
CH.ZH\tZurich\tZurich\t2657895
CH.GE\tGeneva\tGeneva\t2660645
CH.BE\tBern\tBern\t2661551
";

#[test]
fn parses_city_rows_and_counts_skips() {
    let admin1 = parse_admin1(Cursor::new(ADMIN1)).unwrap();
    let (cities, skipped) = parse_cities::<DefaultBackend>(Cursor::new(CITIES), &admin1).unwrap();

    assert_eq!(cities.len(), 4);
    assert_eq!(skipped, 1);

    let zurich = &cities[0];
    assert_eq!(zurich.name(), "Zürich");
    assert_eq!(zurich.alt_name(), "Turicum,Zuerich");
    assert_eq!(zurich.region(), "Zurich");
    assert_eq!(zurich.population(), 341_730);
    assert_eq!(zurich.geohash().len(), 12);

    // No admin1 name for TI: fall back to the raw code.
    assert_eq!(cities[3].region(), "TI");
}

#[test]
fn parses_country_rows() {
    let (countries, skipped) = parse_countries::<DefaultBackend>(Cursor::new(COUNTRIES)).unwrap();
    assert_eq!(skipped, 0);
    assert_eq!(countries.len(), 2);

    let ch = &countries[0];
    assert_eq!(ch.iso2(), "CH");
    assert_eq!(ch.iso3(), "CHE");
    assert_eq!(ch.iso_numeric, 756);
    assert_eq!(ch.capital(), "Bern");
    assert_eq!(ch.area, 41_290);
    assert_eq!(ch.population, 8_516_543);
    assert_eq!(ch.phone_code(), "41");
    assert_eq!(ch.neighbours().collect::<Vec<_>>(), ["DE", "IT", "LI", "FR", "AT"]);
    assert_eq!(ch.languages().count(), 4);
}

#[test]
fn country_source_without_rows_is_an_error() {
    assert!(parse_countries::<DefaultBackend>(Cursor::new("# only comments\n")).is_err());
}

#[test]
fn assemble_sorts_by_folded_name_and_indexes() {
    let (cities, _) = parse_cities::<DefaultBackend>(Cursor::new(CITIES), &HashMap::new()).unwrap();
    let cat = assemble(cities, Vec::new()).unwrap();

    let names: Vec<_> = cat.cities().iter().map(|c| c.name()).collect();
    assert_eq!(names, ["Bern", "Geneva", "Lugano", "Zürich"]);

    let index = cat.name_index().unwrap();
    assert_eq!(index.last_offset("b"), Some(0));
    assert_eq!(index.last_offset("ge"), Some(1));
    assert_eq!(index.last_offset("zu"), Some(3));
    assert_eq!(index.last_offset("x"), None);
}

#[test]
fn build_assets_produces_loadable_catalog() {
    let src = tempdir().unwrap();
    fs::write(src.path().join("cities1000.txt"), CITIES).unwrap();
    fs::write(src.path().join("countryInfo.txt"), COUNTRIES).unwrap();
    fs::write(src.path().join("admin1CodesASCII.txt"), ADMIN1).unwrap();

    let out = tempdir().unwrap();
    let sources = GeoNamesSources::in_dir(src.path());
    assert!(sources.admin1.is_some());

    let report = build_assets(&sources, out.path()).unwrap();
    assert_eq!(report.cities, 4);
    assert_eq!(report.countries, 2);
    assert_eq!(report.skipped_rows, 1);
    assert!(report.outputs.cities.exists());

    let cat = Catalog::load_from_dir(out.path()).unwrap();
    let hit = cat.reverse_geocode(47.37, 8.54).unwrap();
    assert_eq!(hit.name(), "Zürich");
    assert_eq!(cat.country_of(hit).unwrap().name(), "Switzerland");
    assert!(cat.reverse_geocode(0.0, 0.0).is_none());
}

#[test]
fn build_fails_without_city_source() {
    let src = tempdir().unwrap();
    fs::write(src.path().join("countryInfo.txt"), COUNTRIES).unwrap();
    let out = tempdir().unwrap();

    assert!(build_assets(&GeoNamesSources::in_dir(src.path()), out.path()).is_err());
}
