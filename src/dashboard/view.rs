//! Dashboard views: the sidebar menu entries and the reports each one shows.

use crate::data::ReportKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DashboardView {
    Overview,
    TransactionTypes,
    FraudVsNonFraud,
    FraudByStep,
    FraudByType,
    SuspiciousPatterns,
}

impl Default for DashboardView {
    fn default() -> Self {
        DashboardView::Overview
    }
}

impl DashboardView {
    pub const ALL: [DashboardView; 6] = [
        DashboardView::Overview,
        DashboardView::TransactionTypes,
        DashboardView::FraudVsNonFraud,
        DashboardView::FraudByStep,
        DashboardView::FraudByType,
        DashboardView::SuspiciousPatterns,
    ];

    pub fn menu_label(self) -> &'static str {
        match self {
            DashboardView::Overview => "Overview",
            DashboardView::TransactionTypes => "Transaction Types",
            DashboardView::FraudVsNonFraud => "Fraud vs Non-Fraud",
            DashboardView::FraudByStep => "Fraud by Step",
            DashboardView::FraudByType => "Fraud by Transaction Type",
            DashboardView::SuspiciousPatterns => "Suspicious Patterns",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            DashboardView::Overview => "📊 Fraud Transaction Analysis Dashboard",
            DashboardView::TransactionTypes => "📈 Transaction Type Distribution",
            DashboardView::FraudVsNonFraud => "🚨 Fraud vs Non-Fraud Transactions",
            DashboardView::FraudByStep => "⏱ Fraud Count by Step (Hour)",
            DashboardView::FraudByType => "📌 Transaction Types with the Most Fraud",
            DashboardView::SuspiciousPatterns => "🚨 Most Suspicious Fraud Patterns",
        }
    }

    pub fn description(self) -> Option<&'static str> {
        match self {
            DashboardView::Overview => {
                Some("Transaction dataset as it was before the MapReduce analysis.")
            }
            _ => None,
        }
    }

    /// Reports rendered by this view, top to bottom.
    pub fn report_kinds(self) -> &'static [ReportKind] {
        match self {
            DashboardView::Overview => &[ReportKind::RawDataset],
            DashboardView::TransactionTypes => &[ReportKind::TransactionTypes],
            DashboardView::FraudVsNonFraud => &[ReportKind::FraudVsNonFraud],
            DashboardView::FraudByStep => &[ReportKind::FraudByStep],
            DashboardView::FraudByType => &[ReportKind::FraudByType],
            DashboardView::SuspiciousPatterns => {
                &[ReportKind::PatternDetail, ReportKind::RepeatedPatterns]
            }
        }
    }
}
