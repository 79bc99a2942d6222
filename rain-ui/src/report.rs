//! Human-readable composition of a harvest result.

use rain_core::calculations::common::is_positive;
use rain_core::format::{format_decimal, format_number};
use rain_core::share::{ShareContacts, ShareLinks};
use rain_core::{Equivalences, HarvestResult};
use thiserror::Error;

pub const TANK_BAR_MAX: u64 = 10;
pub const SHOWER_BAR_MAX: u64 = 100;
pub const WASH_BAR_MAX: u64 = 200;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum RenderError {
    #[error("malformed record: {0}")]
    MalformedRecord(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub label: &'static str,
    pub text: String,
    pub note: Option<&'static str>,
}

impl ReportRow {
    fn new(
        label: &'static str,
        text: String,
    ) -> Self {
        Self {
            label,
            text,
            note: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProgressBar {
    pub label: &'static str,
    /// Fill width, 0 to 100.
    pub percent: f64,
    pub caption: String,
}

impl ProgressBar {
    fn new(
        label: &'static str,
        count: f64,
        max: u64,
        caption_count: u64,
    ) -> Self {
        Self {
            label,
            percent: (count / max as f64 * 100.0).clamp(0.0, 100.0),
            caption: format!("{caption_count} / {max}"),
        }
    }
}

/// Everything the view needs to paint one result.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultReport {
    /// Record as displayed, with tank capacity and equivalences resolved.
    pub result: HarvestResult,
    pub rows: Vec<ReportRow>,
    pub bars: [ProgressBar; 3],
    pub share: ShareLinks,
}

impl ResultReport {
    /// Builds the report for `result`.
    ///
    /// A non-positive tank capacity is replaced by `default_tank_capacity_l`
    /// and the equivalence counts are recomputed from the volume.
    pub fn build(
        result: &HarvestResult,
        default_tank_capacity_l: f64,
        page_url: &str,
        contacts: &ShareContacts,
    ) -> Result<Self, RenderError> {
        if !result.volume_l.is_finite() || result.volume_l < 0.0 {
            return Err(RenderError::MalformedRecord(format!(
                "volume_l = {}",
                result.volume_l
            )));
        }

        let mut result = result.clone();
        if !is_positive(result.tank_capacity_l) {
            result.tank_capacity_l = default_tank_capacity_l;
        }
        result.equivalences = Equivalences::from_volume(result.volume_l, result.tank_capacity_l);
        let eq = result.equivalences;

        let rows = vec![
            ReportRow {
                note: Some("Annual volume from A × P × C."),
                ..ReportRow::new(
                    "Estimated volume",
                    format!(
                        "{} m³/year ({} L/year).",
                        format_number(result.volume_m3, 3),
                        format_number(result.volume_l, 0)
                    ),
                )
            },
            ReportRow::new(
                "Annual savings",
                match result.annual_savings.filter(|_| result.has_savings) {
                    Some(annual) => format_decimal(annual, 2),
                    None => "Not provided".to_string(),
                },
            ),
            ReportRow::new(
                "ROI",
                match result.roi_months.filter(|_| result.has_roi) {
                    Some(months) => format!(
                        "You will recover your investment in {} months.",
                        format_decimal(months, 1)
                    ),
                    None => "Cost or savings data missing to compute ROI.".to_string(),
                },
            ),
            ReportRow::new(
                "Equivalences",
                format!(
                    "{} full tanks · {} showers · {} wash loads.",
                    eq.tanks_full, eq.showers, eq.wash_loads
                ),
            ),
            ReportRow::new(
                "CO₂ avoided (estimated)",
                format!("{} kg (reference value).", format_number(result.co2_kg, 2)),
            ),
            ReportRow::new(
                "Message",
                "Good job! With this you reduce consumption and help the planet.".to_string(),
            ),
        ];

        let bars = [
            ProgressBar::new(
                "Tanks",
                result.volume_l / result.tank_capacity_l,
                TANK_BAR_MAX,
                eq.tanks_full,
            ),
            ProgressBar::new("Showers", eq.showers as f64, SHOWER_BAR_MAX, eq.showers),
            ProgressBar::new("Wash loads", eq.wash_loads as f64, WASH_BAR_MAX, eq.wash_loads),
        ];

        let share = ShareLinks::build(&result, page_url, contacts);

        Ok(Self {
            result,
            rows,
            bars,
            share,
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rain_core::calculations::DEFAULT_TANK_CAPACITY_L;
    use rain_core::{HarvestCalculator, HarvestInput};
    use rust_decimal_macros::dec;

    use super::*;

    fn calculate(input: HarvestInput) -> HarvestResult {
        HarvestCalculator::default().calculate(&input).unwrap()
    }

    fn build(result: &HarvestResult) -> Result<ResultReport, RenderError> {
        ResultReport::build(
            result,
            DEFAULT_TANK_CAPACITY_L,
            "https://example.org",
            &ShareContacts::default(),
        )
    }

    fn small_roof() -> HarvestResult {
        // 10 m² × 0.5 m × 0.8 = 4 m³
        calculate(HarvestInput::new(10.0, "concrete", 500.0))
    }

    #[test]
    fn rows_follow_the_fixed_order() {
        let report = build(&calculate(HarvestInput::new(100.0, "metal", 800.0))).unwrap();

        let labels: Vec<_> = report.rows.iter().map(|row| row.label).collect();
        assert_eq!(
            labels,
            vec![
                "Estimated volume",
                "Annual savings",
                "ROI",
                "Equivalences",
                "CO₂ avoided (estimated)",
                "Message",
            ]
        );
        assert_eq!(report.rows[0].text, "76.000 m³/year (76,000 L/year).");
        assert_eq!(report.rows[1].text, "Not provided");
        assert_eq!(report.rows[2].text, "Cost or savings data missing to compute ROI.");
        assert_eq!(report.rows[3].text, "69 full tanks · 1266 showers · 1520 wash loads.");
        assert_eq!(report.rows[4].text, "20.52 kg (reference value).");
    }

    #[test]
    fn savings_and_roi_rows_use_money_formatting() {
        let mut input = HarvestInput::new(100.0, "metal", 800.0);
        input.system_cost = Some(dec!(10000));
        input.monthly_savings = Some(dec!(3000));

        let report = build(&calculate(input)).unwrap();

        assert_eq!(report.rows[1].text, "36,000.00");
        assert_eq!(report.rows[2].text, "You will recover your investment in 3.3 months.");
    }

    #[test]
    fn bars_are_capped_at_one_hundred_percent() {
        let report = build(&calculate(HarvestInput::new(100.0, "metal", 800.0))).unwrap();

        for bar in &report.bars {
            assert_eq!(bar.percent, 100.0);
        }
        assert_eq!(report.bars[0].caption, "69 / 10");
        assert_eq!(report.bars[1].caption, "1266 / 100");
        assert_eq!(report.bars[2].caption, "1520 / 200");
    }

    #[test]
    fn tank_bar_uses_the_unfloored_ratio() {
        let report = build(&small_roof()).unwrap();

        // 4000 L / 1100 L = 3.63 tanks -> 36.36 %
        let tanks = &report.bars[0];
        assert!((tanks.percent - 36.3636).abs() < 0.001, "got {}", tanks.percent);
        assert_eq!(tanks.caption, "3 / 10");
        assert!((report.bars[1].percent - 66.0).abs() < 1e-9);
        assert!((report.bars[2].percent - 40.0).abs() < 1e-9);
    }

    #[test]
    fn zero_volume_renders_empty_bars() {
        let report = build(&calculate(HarvestInput::new(50.0, "other", 0.0))).unwrap();

        for bar in &report.bars {
            assert_eq!(bar.percent, 0.0);
        }
        assert_eq!(report.rows[3].text, "0 full tanks · 0 showers · 0 wash loads.");
    }

    #[test]
    fn missing_tank_capacity_falls_back_to_default() {
        let mut result = small_roof();
        result.tank_capacity_l = 0.0;
        result.equivalences = Equivalences::default();

        let report = build(&result).unwrap();

        assert_eq!(report.result.tank_capacity_l, DEFAULT_TANK_CAPACITY_L);
        assert_eq!(report.result.equivalences.tanks_full, 3);
        assert_eq!(report.result.equivalences.showers, 66);
    }

    #[test]
    fn malformed_volume_is_rejected() {
        for volume in [f64::NAN, f64::INFINITY, -1.0] {
            let mut result = small_roof();
            result.volume_l = volume;

            assert!(matches!(build(&result), Err(RenderError::MalformedRecord(_))));
        }
    }

    #[test]
    fn share_links_match_the_displayed_record() {
        let report = build(&small_roof()).unwrap();

        assert!(report.share.message.starts_with("I expect to harvest 4,000 L/year"));
        assert!(report.share.message.contains("That equals 3 tanks."));
    }
}
