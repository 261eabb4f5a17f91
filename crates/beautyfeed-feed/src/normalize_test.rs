use beautyfeed_core::RawParam;
use serde_json::json;

use super::*;

fn keyed(pairs: &[(&str, &str)]) -> RawParams {
    RawParams::Keyed(
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), ParamValue::from(*v)))
            .collect(),
    )
}

fn single(s: &str) -> AttributeValue {
    AttributeValue::Single(s.to_string())
}

fn multiple(items: &[&str]) -> AttributeValue {
    AttributeValue::Multiple(items.iter().map(|s| (*s).to_string()).collect())
}

// -----------------------------------------------------------------------
// key / value translation
// -----------------------------------------------------------------------

#[test]
fn translates_key_and_value() {
    let attrs = normalize_attributes(&keyed(&[("Пол", "Женский")]), None);
    assert_eq!(attrs.len(), 1);
    assert_eq!(attrs.get("Стать"), Some(&single("Жіночий")));
}

#[test]
fn unmapped_key_and_value_pass_through_trimmed() {
    let attrs = normalize_attributes(&keyed(&[("  Лінійка ", " Hydra Boost ")]), None);
    assert_eq!(attrs.get("Лінійка"), Some(&single("Hydra Boost")));
}

#[test]
fn already_canonical_pair_is_unchanged() {
    let attrs = normalize_attributes(&keyed(&[("Стать", "Жіночий")]), None);
    assert_eq!(attrs.get("Стать"), Some(&single("Жіночий")));
}

// -----------------------------------------------------------------------
// pipe splitting
// -----------------------------------------------------------------------

#[test]
fn splits_pipe_values_and_translates_each_segment() {
    let attrs = normalize_attributes(&keyed(&[("Тип шкіри", "Жирна|Сухая")]), None);
    assert_eq!(attrs.get("Тип шкіри"), Some(&multiple(&["Жирна", "Суха"])));
}

#[test]
fn pipe_split_drops_empty_segments() {
    let attrs = normalize_attributes(&keyed(&[("Ефект", " | Увлажнение || Питание |")]), None);
    assert_eq!(
        attrs.get("Ефект"),
        Some(&multiple(&["Зволоження", "Живлення"]))
    );
}

#[test]
fn pipe_only_value_is_dropped() {
    let attrs = normalize_attributes(&keyed(&[("Ефект", "|")]), None);
    assert!(attrs.is_empty());
}

#[test]
fn array_values_are_segment_translated() {
    let params = RawParams::from_json(&json!({"Тип кожи": ["Сухая", " Нормальная ", ""]}));
    let attrs = normalize_attributes(&params, None);
    assert_eq!(
        attrs.get("Тип шкіри"),
        Some(&multiple(&["Суха", "Нормальна"]))
    );
}

// -----------------------------------------------------------------------
// blank dropping
// -----------------------------------------------------------------------

#[test]
fn drops_blank_and_null_values() {
    let params = RawParams::from_json(&json!([
        {"name": "Колір", "value": "   "},
        {"name": "Аромат", "value": null},
        {"name": "Серія", "value": []}
    ]));
    assert!(normalize_attributes(&params, None).is_empty());
}

#[test]
fn drops_blank_names() {
    let attrs = normalize_attributes(&keyed(&[("  ", "value")]), None);
    assert!(attrs.is_empty());
}

// -----------------------------------------------------------------------
// duplicate keys
// -----------------------------------------------------------------------

#[test]
fn repeated_key_accumulates_into_flat_list() {
    let params = RawParams::Pairs(vec![
        RawParam::new("Ефект", "Увлажнение"),
        RawParam::new("Эффект", "Питание"),
    ]);
    let attrs = normalize_attributes(&params, None);
    assert_eq!(
        attrs.get("Ефект"),
        Some(&multiple(&["Зволоження", "Живлення"]))
    );
}

#[test]
fn duplicate_key_with_list_values_never_nests() {
    let params = RawParams::Pairs(vec![
        RawParam::new("Тип шкіри", "Жирна|Сухая"),
        RawParam::new("Тип кожи", "Нормальная"),
        RawParam::new("Тип шкіри", "Чувствительная|Зрелая"),
    ]);
    let attrs = normalize_attributes(&params, None);
    assert_eq!(
        attrs.get("Тип шкіри"),
        Some(&multiple(&["Жирна", "Суха", "Нормальна", "Чутлива", "Зріла"]))
    );
    let json = attrs.to_json();
    assert!(json["Тип шкіри"]
        .as_array()
        .unwrap()
        .iter()
        .all(serde_json::Value::is_string));
}

// -----------------------------------------------------------------------
// units
// -----------------------------------------------------------------------

#[test]
fn appends_unit_to_scalar_value() {
    let params = RawParams::Pairs(vec![RawParam {
        name: "Объем".into(),
        value: "50".into(),
        unit: Some("мл".into()),
    }]);
    let attrs = normalize_attributes(&params, None);
    assert_eq!(attrs.get("Об'єм"), Some(&single("50 мл")));
}

#[test]
fn does_not_duplicate_unit_already_present() {
    let params = RawParams::Pairs(vec![RawParam {
        name: "Об'єм".into(),
        value: "50 мл".into(),
        unit: Some("мл".into()),
    }]);
    let attrs = normalize_attributes(&params, None);
    assert_eq!(attrs.get("Об'єм"), Some(&single("50 мл")));
}

#[test]
fn appends_unit_to_each_pipe_segment() {
    let params = RawParams::Pairs(vec![RawParam {
        name: "Объем".into(),
        value: "30|50 мл".into(),
        unit: Some("мл".into()),
    }]);
    let attrs = normalize_attributes(&params, None);
    assert_eq!(attrs.get("Об'єм"), Some(&multiple(&["30 мл", "50 мл"])));
}

#[test]
fn appends_unit_to_each_list_item() {
    let params = RawParams::Pairs(vec![RawParam {
        name: "Объем".into(),
        value: ParamValue::List(vec!["30".into(), ParamValue::Null, "50".into()]),
        unit: Some("мл".into()),
    }]);
    let attrs = normalize_attributes(&params, None);
    assert_eq!(attrs.get("Об'єм"), Some(&multiple(&["30 мл", "50 мл"])));
}

// -----------------------------------------------------------------------
// brand attribute
// -----------------------------------------------------------------------

#[test]
fn vendor_sets_brand_attribute() {
    let attrs = normalize_attributes(&RawParams::default(), Some("  La Roche-Posay "));
    assert_eq!(attrs.get(BRAND_ATTRIBUTE), Some(&single("La Roche-Posay")));
}

#[test]
fn vendor_overrides_brand_parameter() {
    let attrs = normalize_attributes(&keyed(&[("Бренд", "Other")]), Some("Vichy"));
    assert_eq!(attrs.get(BRAND_ATTRIBUTE), Some(&single("Vichy")));
}

#[test]
fn blank_vendor_leaves_brand_untouched() {
    let attrs = normalize_attributes(&keyed(&[("Бренд", "Bioderma")]), Some("   "));
    assert_eq!(attrs.get(BRAND_ATTRIBUTE), Some(&single("Bioderma")));

    let attrs = normalize_attributes(&RawParams::default(), None);
    assert!(!attrs.contains_key(BRAND_ATTRIBUTE));
}

#[test]
fn canonical_key_trims_and_translates() {
    assert_eq!(canonical_key(" Пол "), "Стать");
    assert_eq!(canonical_key("Об'єм"), "Об'єм");
}
