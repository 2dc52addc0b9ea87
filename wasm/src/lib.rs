//! WebAssembly module for the assessment form
//!
//! Provides client-side computation for:
//! - Price preview while the grader types measurements
//! - Decision and rejection reasons
//! - Input range validation before submit

use rust_decimal::Decimal;
use serde::Serialize;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::pricing::*;
pub use shared::validation::*;

/// Result plus price breakdown, as shown in the preview panel
#[derive(Debug, Serialize)]
struct Preview {
    result: AssessmentResult,
    breakdown: Option<PriceBreakdown>,
}

fn parse_measurement(measurement_json: &str) -> Result<QualityMeasurement, String> {
    serde_json::from_str(measurement_json).map_err(|e| format!("Invalid measurement JSON: {}", e))
}

fn preview_json(measurement_json: &str) -> Result<String, String> {
    let measurement = parse_measurement(measurement_json)?;
    let policy = PricingPolicy::default();
    let result = policy.evaluate(&measurement);
    let breakdown = match (result.final_price, result.derived_outturn_pct) {
        (Some(_), Some(derived)) => policy.price_breakdown(&measurement, derived),
        _ => None,
    };
    serde_json::to_string(&Preview { result, breakdown }).map_err(|e| e.to_string())
}

fn final_price_text(measurement_json: &str) -> Result<String, String> {
    let measurement = parse_measurement(measurement_json)?;
    Ok(evaluate(&measurement)
        .final_price
        .map(|p| p.to_string())
        .unwrap_or_default())
}

fn validation_issues(measurement_json: &str) -> Result<String, String> {
    let measurement = parse_measurement(measurement_json)?;
    let issues = match validate_measurement(&measurement) {
        Ok(()) => Vec::new(),
        Err(errors) => errors.0,
    };
    serde_json::to_string(&issues).map_err(|e| e.to_string())
}

/// Evaluate a measurement; returns the result and price breakdown as JSON
#[wasm_bindgen]
pub fn preview_assessment(measurement_json: &str) -> Result<String, JsValue> {
    preview_json(measurement_json).map_err(|e| JsValue::from_str(&e))
}

/// Final price as a decimal string, empty when the lot cannot be priced
#[wasm_bindgen]
pub fn preview_final_price(measurement_json: &str) -> Result<String, JsValue> {
    final_price_text(measurement_json).map_err(|e| JsValue::from_str(&e))
}

/// Field errors as a JSON array, empty when the measurement is in range
#[wasm_bindgen]
pub fn validate_measurement_json(measurement_json: &str) -> Result<String, JsValue> {
    validation_issues(measurement_json).map_err(|e| JsValue::from_str(&e))
}

/// Check a single percentage field as the grader leaves it
#[wasm_bindgen]
pub fn is_valid_percentage(value: &str) -> bool {
    value
        .trim()
        .parse::<Decimal>()
        .map(|v| validate_percentage(v).is_ok())
        .unwrap_or(false)
}

/// Foreign matter (pods + husks + stones) for the read-only FM field
#[wasm_bindgen]
pub fn foreign_matter(pods: &str, husks: &str, stones: &str) -> String {
    let parse = |s: &str| s.trim().parse::<Decimal>().unwrap_or(Decimal::ZERO);
    let total = parse(pods)
        .saturating_add(parse(husks))
        .saturating_add(parse(stones));
    shared::round2(total).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PERFECT_LOT: &str = r#"{
        "moisture_pct": "12",
        "group1_defect_pct": "0.5",
        "group2_defect_pct": "3",
        "below_screen12_pct": "0.5",
        "pods_pct": "0",
        "husks_pct": "0",
        "stones_pct": "0",
        "reference_price": "5000"
    }"#;

    #[test]
    fn test_final_price_preview() {
        assert_eq!(final_price_text(PERFECT_LOT).unwrap(), "7900.00");
    }

    #[test]
    fn test_unpriced_preview_is_empty() {
        let json = PERFECT_LOT.replace(r#""reference_price": "5000""#, r#""offered_price": "4800""#);
        assert_eq!(final_price_text(&json).unwrap(), "");
    }

    #[test]
    fn test_preview_contains_breakdown() {
        let preview = preview_json(PERFECT_LOT).unwrap();
        let value: serde_json::Value = serde_json::from_str(&preview).unwrap();
        assert_eq!(value["result"]["decision"], "Accepted");
        assert_eq!(value["breakdown"]["adjustments"][0]["kind"], "quality_bonus");
    }

    #[test]
    fn test_overflowing_lot_previews_unpriced() {
        let json = PERFECT_LOT.replace(r#""stones_pct": "0""#, r#""stones_pct": "-5000000000000000000000000000""#);
        assert_eq!(final_price_text(&json).unwrap(), "");
        let value: serde_json::Value = serde_json::from_str(&preview_json(&json).unwrap()).unwrap();
        assert!(value["breakdown"].is_null());
    }

    #[test]
    fn test_bad_json_is_reported() {
        assert!(preview_json("{").unwrap_err().starts_with("Invalid measurement JSON"));
    }

    #[test]
    fn test_validation_issues() {
        assert_eq!(validation_issues(PERFECT_LOT).unwrap(), "[]");
        let json = PERFECT_LOT.replace(r#""moisture_pct": "12""#, r#""moisture_pct": "112""#);
        let issues = validation_issues(&json).unwrap();
        assert!(issues.contains("moisture_pct"));
    }

    #[test]
    fn test_percentage_field_check() {
        assert!(is_valid_percentage("12.5"));
        assert!(is_valid_percentage(" 100 "));
        assert!(!is_valid_percentage("100.5"));
        assert!(!is_valid_percentage("abc"));
    }

    #[test]
    fn test_foreign_matter_field() {
        assert_eq!(foreign_matter("1.5", "0.25", ""), "1.75");
        let max = Decimal::MAX.to_string();
        assert_eq!(foreign_matter(&max, &max, "1"), max);
    }
}
