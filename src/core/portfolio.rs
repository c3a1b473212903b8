//! Portfolio-level aggregates over a collection of fund snapshots.
use crate::core::snapshot::FundSnapshot;
use serde::Serialize;
use std::collections::HashMap;

/// Summed fund scale for one issuing company.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyScale {
    pub company: String,
    pub scale: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    pub fund_count: usize,
    pub total_scale: f64,
    pub avg_tracking_error: Option<f64>,
    pub company_distribution: Vec<CompanyScale>,
}

/// Computes every portfolio aggregate for the given snapshots.
pub fn aggregate_portfolio(snapshots: &[FundSnapshot]) -> PortfolioSummary {
    PortfolioSummary {
        fund_count: snapshots.len(),
        total_scale: total_scale(snapshots),
        avg_tracking_error: average_tracking_error(snapshots),
        company_distribution: scale_by_company(snapshots),
    }
}

/// Sum of the reported fund sizes. Zero when no fund reports a size.
pub fn total_scale(snapshots: &[FundSnapshot]) -> f64 {
    snapshots.iter().filter_map(|s| s.fund.fund_size).sum()
}

/// Mean tracking error over the funds that report one.
pub fn average_tracking_error(snapshots: &[FundSnapshot]) -> Option<f64> {
    let errors: Vec<f64> = snapshots
        .iter()
        .filter_map(|s| s.fund.tracking_error)
        .collect();
    if errors.is_empty() {
        return None;
    }
    Some(errors.iter().sum::<f64>() / errors.len() as f64)
}

/// Groups fund sizes by company, largest first.
///
/// Funds without a company are skipped. A missing size adds nothing to its
/// group. Equal totals keep the order in which companies were first seen.
pub fn scale_by_company(snapshots: &[FundSnapshot]) -> Vec<CompanyScale> {
    let mut groups: Vec<CompanyScale> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for snapshot in snapshots {
        let Some(company) = snapshot.fund.company.as_deref() else {
            continue;
        };
        let size = snapshot.fund.fund_size.unwrap_or(0.0);
        match index.get(company) {
            Some(&i) => groups[i].scale += size,
            None => {
                index.insert(company, groups.len());
                groups.push(CompanyScale {
                    company: company.to_string(),
                    scale: size,
                });
            }
        }
    }

    groups.sort_by(|a, b| b.scale.total_cmp(&a.scale));
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fund::FundRecord;
    use crate::core::snapshot::unpriced_snapshot;

    fn snapshot(
        code: &str,
        company: Option<&str>,
        size: Option<f64>,
        tracking_error: Option<f64>,
    ) -> FundSnapshot {
        let mut record = FundRecord::new(code, code);
        record.company = company.map(str::to_string);
        record.fund_size = size;
        record.tracking_error = tracking_error;
        unpriced_snapshot(record)
    }

    #[test]
    fn test_empty_collection() {
        let summary = aggregate_portfolio(&[]);
        assert_eq!(summary.fund_count, 0);
        assert_eq!(summary.total_scale, 0.0);
        assert!(summary.avg_tracking_error.is_none());
        assert!(summary.company_distribution.is_empty());
    }

    #[test]
    fn test_company_distribution_sorted_by_scale() {
        let snapshots = vec![
            snapshot("1", Some("A"), Some(10.0), None),
            snapshot("2", Some("B"), Some(30.0), None),
            snapshot("3", Some("A"), Some(5.0), None),
        ];

        assert_eq!(
            scale_by_company(&snapshots),
            vec![
                CompanyScale {
                    company: "B".to_string(),
                    scale: 30.0
                },
                CompanyScale {
                    company: "A".to_string(),
                    scale: 15.0
                },
            ]
        );
    }

    #[test]
    fn test_company_ties_keep_first_seen_order() {
        let snapshots = vec![
            snapshot("1", Some("C"), Some(5.0), None),
            snapshot("2", Some("A"), Some(5.0), None),
            snapshot("3", Some("B"), Some(9.0), None),
            snapshot("4", None, Some(100.0), None),
            snapshot("5", Some("A"), None, None),
        ];

        let companies: Vec<String> = scale_by_company(&snapshots)
            .into_iter()
            .map(|c| c.company)
            .collect();
        assert_eq!(companies, vec!["B", "C", "A"]);
    }

    #[test]
    fn test_missing_values_are_skipped() {
        let snapshots = vec![
            snapshot("1", Some("A"), Some(12.5), Some(1.0)),
            snapshot("2", Some("B"), None, None),
            snapshot("3", None, Some(7.5), Some(2.0)),
        ];

        let summary = aggregate_portfolio(&snapshots);
        assert_eq!(summary.fund_count, 3);
        assert_eq!(summary.total_scale, 20.0);
        // the fund without a tracking error must not pull the mean towards zero
        assert_eq!(summary.avg_tracking_error, Some(1.5));
        assert_eq!(summary.company_distribution.len(), 2);
        assert_eq!(summary.company_distribution[1].scale, 0.0);
    }

    #[test]
    fn test_no_tracking_errors_is_unavailable() {
        let snapshots = vec![snapshot("1", Some("A"), Some(1.0), None)];
        assert!(average_tracking_error(&snapshots).is_none());
        assert_eq!(total_scale(&[snapshot("2", None, None, None)]), 0.0);
    }
}
