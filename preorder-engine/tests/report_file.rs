use std::io::Write;

use preorder_engine::{OverAllocationPolicy, PreorderError, build_sale_report, load_sale};
use shared::{ErrorCode, Quantity};

const SALE_JSON: &str = r#"{
  "breads": [
    {
      "id": "rye",
      "name": "Rye",
      "price": "10",
      "totalAvailable": 20,
      "kibbutzAllocations": { "A": 5, "C": 3 },
      "orders": [
        { "customerId": "alice", "quantity": 2, "groupId": "A",
          "pricing": { "discountPercentage": 20, "surchargeType": "perUnit", "surchargeValue": 1 } },
        { "customerId": "dan", "quantity": 4, "kibbutzId": "" },
        { "customerId": "old", "quantity": null, "groupId": "A" }
      ]
    },
    {
      "id": "challah",
      "name": "Challah",
      "basePrice": 16,
      "kind": "soft",
      "totalAvailable": 8,
      "orders": [
        { "customerId": "bob", "quantity": "1.5", "groupId": "B" }
      ]
    }
  ],
  "kibbutzim": [
    { "id": "A", "name": "Alonim", "discountPercentage": 50 },
    { "id": "B", "name": "Bar Am", "surchargeType": "perOrder", "surchargeValue": 5 },
    { "id": "C", "name": "Carmia", "isClub": true, "surchargeType": "mystery" }
  ]
}"#;

fn write_sale(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("create temp file");
    file.write_all(contents.as_bytes()).expect("write sale");
    file
}

#[test]
fn test_report_from_file() {
    let file = write_sale(SALE_JSON);
    let sale = load_sale(file.path()).expect("load sale");
    assert_eq!(sale.breads.len(), 2);

    let report = build_sale_report(&sale, OverAllocationPolicy::Tolerate).expect("report");

    // Rye: 20 - A's 5 (C is a club) = 15, dan's 4 -> 11
    let rye = &report.breads[0];
    assert_eq!(rye.base_price, 10.0);
    assert_eq!(rye.general_capacity, Quantity::whole(15));
    assert_eq!(rye.available_general, Quantity::whole(11));
    assert_eq!(rye.kibbutz_available["A"], Quantity::whole(3));
    assert!(!rye.kibbutz_available.contains_key("C"));
    // alice pays the snapshot (9 each), not A's live 50%
    assert_eq!(rye.revenue, 58.0);

    // Challah: legacy line priced from live B, 1.5 * 16 + 5
    let challah = &report.breads[1];
    assert_eq!(challah.ordered, Quantity::from_half_units(3));
    assert_eq!(challah.revenue, 29.0);

    assert_eq!(report.total_revenue, 87.0);
}

#[test]
fn test_strict_policy_rejects_over_allocation() {
    let file = write_sale(
        r#"{
          "breads": [
            { "id": "spelt", "name": "Spelt", "basePrice": 12, "totalAvailable": 4,
              "kibbutzAllocations": { "A": 3, "B": 3 } }
          ],
          "kibbutzim": [
            { "id": "A", "name": "Alonim" },
            { "id": "B", "name": "Bar Am" }
          ]
        }"#,
    );
    let sale = load_sale(file.path()).expect("load sale");

    let report = build_sale_report(&sale, OverAllocationPolicy::Tolerate).expect("tolerated");
    assert!(report.breads[0].over_allocated);
    assert_eq!(report.breads[0].available_general, Quantity::ZERO);

    let err = build_sale_report(&sale, OverAllocationPolicy::Strict).unwrap_err();
    assert_eq!(err.code(), ErrorCode::BreadOverAllocated);
}

#[test]
fn test_load_errors() {
    let missing = load_sale("/nonexistent/sale.json").unwrap_err();
    assert!(matches!(missing, PreorderError::Io(_)));

    let file = write_sale("{ not json");
    let broken = load_sale(file.path()).unwrap_err();
    assert!(matches!(broken, PreorderError::Json(_)));
}

#[test]
fn test_extreme_numbers_degrade_instead_of_panicking() {
    let file = write_sale(
        r#"{
          "breads": [
            { "id": "gold", "name": "Gold Loaf", "basePrice": 1e20, "totalAvailable": 1e19,
              "orders": [
                { "customerId": "c1", "quantity": 1e10 },
                { "customerId": "c2", "quantity": 1e19 },
                { "customerId": "c3", "quantity": 1e19 }
              ] }
          ],
          "kibbutzim": []
        }"#,
    );
    let sale = load_sale(file.path()).expect("load sale");
    let report = build_sale_report(&sale, OverAllocationPolicy::Tolerate).expect("report");

    let gold = &report.breads[0];
    assert_eq!(gold.total_available, Quantity::MAX);
    assert!(gold.ordered > Quantity::MAX);
    assert_eq!(gold.available_general, Quantity::ZERO);
    assert!(gold.revenue.is_finite() && gold.revenue > 0.0);
    assert!(report.total_revenue.is_finite() && report.total_revenue > 0.0);
}
