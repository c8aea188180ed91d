//! Portfolio bodies

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use domain_fund::{Investment, PortfolioSummary};

/// Purchase of a fund at its current NAV
#[derive(Debug, Deserialize)]
pub struct InvestmentRequest {
    pub fund_id: String,
    pub amount: Decimal,
}

#[derive(Debug, Serialize)]
pub struct PortfolioResponse {
    pub investments: Vec<Investment>,
    pub summary: PortfolioSummary,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_amount_accepts_string_or_number() {
        let request: InvestmentRequest =
            serde_json::from_str(r#"{"fund_id": "1", "amount": "50000"}"#).unwrap();
        assert_eq!(request.amount, dec!(50000));

        let request: InvestmentRequest =
            serde_json::from_str(r#"{"fund_id": "1", "amount": 2500.5}"#).unwrap();
        assert_eq!(request.amount, dec!(2500.5));
    }
}
