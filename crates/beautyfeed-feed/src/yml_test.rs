use super::*;

const SAMPLE_FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<yml_catalog date="2026-10-01 10:00">
  <shop>
    <name>Beauty Shop</name>
    <currencies>
      <currency id="UAH" rate="1"/>
    </currencies>
    <categories>
      <category id="20" parentId="10">Креми для обличчя</category>
      <category id="10">Догляд за шкірою</category>
    </categories>
    <offers>
      <offer id="A-1" available="true">
        <name>Крем для обличчя зволожуючий</name>
        <price>349.00</price>
        <oldprice>399.00</oldprice>
        <currencyId>UAH</currencyId>
        <categoryId>20</categoryId>
        <vendor>L'Oreal & Co</vendor>
        <vendorCode>LO-778</vendorCode>
        <country_of_origin>Франція</country_of_origin>
        <description><![CDATA[<p>Легка текстура</p>]]></description>
        <picture>https://cdn.example.com/a1-1.jpg</picture>
        <picture>https://cdn.example.com/a1-2.jpg</picture>
        <param name="Пол">Женский</param>
        <param name="Объем" unit="мл">50</param>
        <param name="Тип кожи">Жирна|Сухая</param>
      </offer>
      <offer id="A-2" available="false">
        <model>Тонік</model>
        <price>120</price>
        <categoryId>10</categoryId>
      </offer>
    </offers>
  </shop>
</yml_catalog>"#;

#[test]
fn parse_catalog_reads_categories_in_feed_order() {
    let catalog = parse_catalog(SAMPLE_FEED).unwrap();
    assert_eq!(catalog.categories.len(), 2);
    assert_eq!(catalog.categories[0].external_id, "20");
    assert_eq!(catalog.categories[0].name, "Креми для обличчя");
    assert_eq!(
        catalog.categories[0].parent_external_id.as_deref(),
        Some("10")
    );
    assert_eq!(catalog.categories[1].parent_external_id, None);
}

#[test]
fn parse_catalog_reads_offer_fields() {
    let catalog = parse_catalog(SAMPLE_FEED).unwrap();
    assert_eq!(catalog.offers.len(), 2);

    let offer = &catalog.offers[0];
    assert_eq!(offer.external_id, "A-1");
    assert_eq!(offer.name.as_deref(), Some("Крем для обличчя зволожуючий"));
    assert_eq!(offer.price.as_deref(), Some("349.00"));
    assert_eq!(offer.old_price.as_deref(), Some("399.00"));
    assert_eq!(offer.currency_id.as_deref(), Some("UAH"));
    assert_eq!(offer.category_external_id.as_deref(), Some("20"));
    assert_eq!(offer.vendor.as_deref(), Some("L'Oreal & Co"));
    assert_eq!(offer.vendor_code.as_deref(), Some("LO-778"));
    assert_eq!(offer.country_of_origin.as_deref(), Some("Франція"));
    assert_eq!(offer.description.as_deref(), Some("<p>Легка текстура</p>"));
    assert_eq!(offer.available, Some(StockFlag::Text("true".into())));
    assert_eq!(
        offer.pictures,
        vec![
            "https://cdn.example.com/a1-1.jpg".to_string(),
            "https://cdn.example.com/a1-2.jpg".to_string()
        ]
    );
}

#[test]
fn parse_catalog_reads_params_with_units() {
    let catalog = parse_catalog(SAMPLE_FEED).unwrap();
    let entries = catalog.offers[0].params.entries();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[1].name, "Объем");
    assert_eq!(entries[1].unit, Some("мл"));
    assert_eq!(entries[2].value, &ParamValue::Text("Жирна|Сухая".into()));
}

#[test]
fn parse_catalog_offer_with_only_model() {
    let catalog = parse_catalog(SAMPLE_FEED).unwrap();
    let offer = &catalog.offers[1];
    assert_eq!(offer.name, None);
    assert_eq!(offer.model.as_deref(), Some("Тонік"));
    assert!(offer.pictures.is_empty());
    assert!(offer.params.is_empty());
}

#[test]
fn parse_catalog_single_offer_is_still_a_list() {
    let feed = r#"<yml_catalog><shop><offers><offer id="1"><price>1</price></offer></offers></shop></yml_catalog>"#;
    let catalog = parse_catalog(feed).unwrap();
    assert_eq!(catalog.offers.len(), 1);
    assert!(catalog.categories.is_empty());
}

#[test]
fn parse_catalog_accepts_shop_as_root() {
    let feed = r#"<shop><categories><category id="1">A</category></categories></shop>"#;
    let catalog = parse_catalog(feed).unwrap();
    assert_eq!(catalog.categories.len(), 1);
}

#[test]
fn parse_catalog_accepts_products_container() {
    let feed = r#"<yml_catalog><shop><products><product id="p1"><name>X</name></product></products></shop></yml_catalog>"#;
    let catalog = parse_catalog(feed).unwrap();
    assert_eq!(catalog.offers.len(), 1);
    assert_eq!(catalog.offers[0].external_id, "p1");
}

#[test]
fn parse_catalog_available_child_element() {
    let feed = r#"<shop><offers><offer id="1"><available>true</available></offer></offers></shop>"#;
    let catalog = parse_catalog(feed).unwrap();
    assert_eq!(
        catalog.offers[0].available,
        Some(StockFlag::Text("true".into()))
    );
}

#[test]
fn parse_catalog_skips_records_without_id() {
    let feed = r#"<shop>
        <categories><category>No id</category><category id="2">Ok</category></categories>
        <offers><offer><name>No id</name></offer><offer id="9"/></offers>
    </shop>"#;
    let catalog = parse_catalog(feed).unwrap();
    assert_eq!(catalog.categories.len(), 1);
    assert_eq!(catalog.offers.len(), 1);
    assert_eq!(catalog.offers[0].external_id, "9");
}

#[test]
fn parse_catalog_skips_params_without_name() {
    let feed = r#"<shop><offers><offer id="1"><param>orphan</param><param name="Колір">Червоний</param></offer></offers></shop>"#;
    let catalog = parse_catalog(feed).unwrap();
    assert_eq!(catalog.offers[0].params.len(), 1);
}

#[test]
fn parse_catalog_propagates_malformed_document() {
    let feed = "<yml_catalog><shop><offers></shop></yml_catalog>";
    assert!(parse_catalog(feed).is_err());
}
