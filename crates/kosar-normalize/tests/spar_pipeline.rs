//! End-to-end run over an on-disk data directory: locate the newest raw
//! export, filter it, normalize it, and read the normalized records back.

use std::path::Path;

use kosar_core::{ColumnsFile, NormalizedProduct, Quantity, Unit};
use kosar_normalize::files::{ALL_DATA, FILTERED_DATA, NORMALIZED_DATA};
use kosar_normalize::{
    dated_file_name, filter_file, latest_data_file, normalize_file, OverrideTables, Outcome,
};

const RAW: &str = "\
,id,name,barcode_gtin,unit_info,disabled_info.disable_text,price,original_price,unit_price.unit,unit_price.base,unit_price.price,unit_price.original_price,category_slug,sell_by_weight_config.input_type,sell_by_weight_config.grams_per_step,sell_by_weight_config.price_per_kg,images,tags,vat_percentage
0,p1,Pöttyös Túró Rudi 30 g,5998200000123,30 g,,19900,,,,,,tejtermekek,,,,\"['https://img/rudi.jpg']\",x,27
1,p2,\"Heineken sör 6 x 0,33 l\",8712000000001,\"0,33 l\",,249900,299900,,,,,sor,,,,,x,27
2,p3,Banán,,,Sold out,,,kilogram,1,59900,,gyumolcs,,,,,x,5
3,p4,Csirkemell filé,,,,,,,,,,hus,grams,100,249900,,x,5
";

fn write_overrides(dir: &Path) {
    std::fs::create_dir_all(dir).unwrap();
    std::fs::write(
        dir.join("name_larger.txt"),
        "Heineken sör 6 x 0,33 l\n6 db\n",
    )
    .unwrap();
}

fn read_products(path: &Path) -> Vec<NormalizedProduct> {
    let mut rdr = csv::Reader::from_path(path).unwrap();
    rdr.deserialize().collect::<Result<_, _>>().unwrap()
}

#[test]
fn filter_then_normalize_latest_export() {
    let data = tempfile::tempdir().unwrap();
    let raw_path = dated_file_name(data.path(), "spar", ALL_DATA, "20240501_063000");
    std::fs::write(&raw_path, RAW).unwrap();

    let overrides_dir = data.path().join("overrides");
    write_overrides(&overrides_dir);
    let overrides = OverrideTables::load_dir(&overrides_dir).unwrap();

    let latest = latest_data_file(data.path(), "spar", ALL_DATA).unwrap();
    assert_eq!(latest.path, raw_path);

    let columns = ColumnsFile {
        drop: vec!["tags".to_string(), "vat_percentage".to_string()],
    };
    let filtered = dated_file_name(data.path(), "spar", FILTERED_DATA, &latest.stamp);
    let filter_summary = filter_file(&latest.path, &filtered, &columns).unwrap();
    assert_eq!(filter_summary.rows, 4);
    assert_eq!(filter_summary.dropped, vec!["tags", "vat_percentage"]);

    let normalized = dated_file_name(data.path(), "spar", NORMALIZED_DATA, &latest.stamp);
    let summary = normalize_file(&latest.path, &normalized, &overrides, "Spar").unwrap();
    assert_eq!(summary.rows, 4);
    assert_eq!(summary.count(Outcome::NameLarger), 1);
    assert_eq!(summary.overrides_applied, 1);
    assert_eq!(summary.custom_applied, 1);

    let products = read_products(&normalized);
    assert_eq!(products.len(), 4);

    let rudi = &products[0];
    assert_eq!(rudi.store_product_id, "p1");
    assert_eq!(rudi.barcode.as_deref(), Some("5998200000123"));
    assert_eq!(rudi.unit_price, Some(199.0));
    assert_eq!(rudi.primary_size(), Some(Quantity::new(30.0, Unit::Gram)));
    assert_eq!(rudi.image_urls.as_deref(), Some("https://img/rudi.jpg"));

    let beer = &products[1];
    assert!(beer.is_discounted);
    assert_eq!(beer.original_unit_price, Some(2999.0));
    assert_eq!(beer.primary_size(), Some(Quantity::new(1980.0, Unit::Milliliter)));
    assert_eq!(beer.secondary_size(), Some(Quantity::new(6.0, Unit::Piece)));

    let banana = &products[2];
    assert!(!banana.available);
    assert_eq!(banana.unit_price, Some(599.0));
    assert_eq!(banana.primary_size(), Some(Quantity::new(1000.0, Unit::Gram)));

    let chicken = &products[3];
    assert_eq!(chicken.unit_price, Some(249.9));
    assert_eq!(chicken.primary_size(), Some(Quantity::new(100.0, Unit::Gram)));
    assert_eq!(chicken.categories.as_deref(), Some("hus"));
}

#[test]
fn missing_override_directory_normalizes_without_overrides() {
    let data = tempfile::tempdir().unwrap();
    let overrides = OverrideTables::load_dir(&data.path().join("absent")).unwrap();

    let input = data.path().join("in.csv");
    let output = data.path().join("out.csv");
    std::fs::write(&input, RAW).unwrap();

    let summary = normalize_file(&input, &output, &overrides, "Spar").unwrap();
    assert_eq!(summary.overrides_applied, 0);

    let beer = &read_products(&output)[1];
    assert_eq!(beer.primary_size(), Some(Quantity::new(330.0, Unit::Milliliter)));
    assert_eq!(beer.secondary_size(), Some(Quantity::pack()));
}
