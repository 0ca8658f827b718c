use crate::clients::ClientId;
use crate::portfolios::{
    allocation_total, AssetAllocation, AssetAllocationUpdate, Portfolio, PortfolioUpdate,
};
use chrono::NaiveDate;
use rust_decimal_macros::dec;

fn allocation(id: i32, pct: rust_decimal::Decimal) -> AssetAllocation {
    AssetAllocation {
        id,
        portfolio_id: 1,
        asset_type: format!("Class {}", id),
        allocation: pct,
        value: pct * dec!(1000),
    }
}

#[test]
fn portfolio_serializes_camel_case_numbers() {
    let portfolio = Portfolio {
        id: 7,
        client_id: ClientId::parse("WM-001").unwrap(),
        total_value: dec!(2500000.00),
        ytd_return: dec!(8.5),
        volatility: dec!(12.3),
        last_updated: NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap(),
    };
    let json = serde_json::to_value(&portfolio).unwrap();
    assert_eq!(json["clientId"], "WM-001");
    assert_eq!(json["totalValue"], 2500000.0);
    assert_eq!(json["ytdReturn"], 8.5);
}

#[test]
fn allocation_total_does_not_normalize() {
    let rows = vec![allocation(1, dec!(60)), allocation(2, dec!(30))];
    assert_eq!(allocation_total(&rows), dec!(90));
    assert_eq!(allocation_total(&[]), dec!(0));
}

#[test]
fn empty_updates_are_rejected() {
    assert!(PortfolioUpdate::default().validate().is_err());
    assert!(AssetAllocationUpdate::default().validate().is_err());
}

#[test]
fn portfolio_update_rejects_negative_values() {
    let update = PortfolioUpdate {
        total_value: Some(dec!(-1)),
        ..Default::default()
    };
    assert!(update.validate().is_err());

    let ok = PortfolioUpdate {
        ytd_return: Some(dec!(-4.2)),
        ..Default::default()
    };
    assert!(ok.validate().is_ok());
}

#[test]
fn allocation_update_bounds() {
    let too_big = AssetAllocationUpdate {
        allocation: Some(dec!(120)),
        ..Default::default()
    };
    assert!(too_big.validate().is_err());

    let blank_type = AssetAllocationUpdate {
        asset_type: Some(" ".to_string()),
        ..Default::default()
    };
    assert!(blank_type.validate().is_err());

    let ok = AssetAllocationUpdate {
        allocation: Some(dec!(45)),
        value: Some(dec!(450000)),
        ..Default::default()
    };
    assert!(ok.validate().is_ok());
}

#[test]
fn portfolio_update_rejects_out_of_range_figures() {
    let huge_value = PortfolioUpdate {
        total_value: Some(dec!(10000000000000000000000000000)),
        ..Default::default()
    };
    assert!(huge_value.validate().is_err());

    let huge_return = PortfolioUpdate {
        ytd_return: Some(rust_decimal::Decimal::MAX),
        ..Default::default()
    };
    assert!(huge_return.validate().is_err());

    let huge_loss = PortfolioUpdate {
        ytd_return: Some(rust_decimal::Decimal::MIN),
        ..Default::default()
    };
    assert!(huge_loss.validate().is_err());

    let huge_volatility = PortfolioUpdate {
        volatility: Some(dec!(5000)),
        ..Default::default()
    };
    assert!(huge_volatility.validate().is_err());

    let large_but_fine = PortfolioUpdate {
        total_value: Some(dec!(950000000000)),
        ytd_return: Some(dec!(250)),
        volatility: Some(dec!(80)),
    };
    assert!(large_but_fine.validate().is_ok());
}

#[test]
fn allocation_update_rejects_out_of_range_value() {
    let update = AssetAllocationUpdate {
        value: Some(dec!(100000000000000000000)),
        ..Default::default()
    };
    assert!(update.validate().is_err());
}
