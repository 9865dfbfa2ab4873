// 📄 Report Model - wire shape of the backend's parsed Experian reports
// Every scalar is optional and every nested group is present/absent.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

// ============================================================================
// REPORT
// ============================================================================

/// A credit report as returned by `GET /api/reports` (summary fields only)
/// or `GET /api/reports/{id}` (summary fields plus the nested groups).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Report {
    #[serde(rename = "_id", deserialize_with = "lenient::text")]
    pub id: Option<String>,

    #[serde(deserialize_with = "lenient::text")]
    pub name: Option<String>,

    #[serde(deserialize_with = "lenient::text")]
    pub pan: Option<String>,

    /// A bare number on list items, the full score group on detail records
    #[serde(deserialize_with = "lenient::score")]
    pub credit_score: Option<ScoreField>,

    #[serde(deserialize_with = "lenient::text")]
    pub uploaded_at: Option<String>,

    #[serde(deserialize_with = "lenient::number")]
    pub total_accounts: Option<f64>,

    #[serde(deserialize_with = "lenient::number")]
    pub total_credit_cards: Option<f64>,

    #[serde(deserialize_with = "lenient::number")]
    pub current_balance: Option<f64>,

    #[serde(deserialize_with = "lenient::group")]
    pub basic_details: Option<BasicDetails>,

    #[serde(deserialize_with = "lenient::group")]
    pub report_summary: Option<ReportSummary>,

    #[serde(deserialize_with = "lenient::group")]
    pub credit_accounts_information: Option<CreditAccountsInformation>,

    #[serde(deserialize_with = "lenient::list")]
    pub credit_enquiries: Vec<Enquiry>,

    #[serde(deserialize_with = "lenient::group")]
    pub metadata: Option<Metadata>,
}

impl Report {
    /// Headline score: the summary number, or the bureau score of the group
    pub fn headline_score(&self) -> Option<f64> {
        match self.credit_score.as_ref()? {
            ScoreField::Value(score) => Some(*score),
            ScoreField::Detail(detail) => detail.bureau_score,
        }
    }

    /// Nested score group, absent on list items
    pub fn score_details(&self) -> Option<&CreditScore> {
        match self.credit_score.as_ref()? {
            ScoreField::Detail(detail) => Some(detail),
            ScoreField::Value(_) => None,
        }
    }

    pub fn accounts(&self) -> &[Account] {
        self.credit_accounts_information
            .as_ref()
            .map(|info| info.accounts.as_slice())
            .unwrap_or(&[])
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ScoreField {
    Value(f64),
    Detail(CreditScore),
}

// ============================================================================
// NESTED GROUPS
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BasicDetails {
    #[serde(deserialize_with = "lenient::text")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub date_of_birth: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub gender: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub mobile: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub email: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub pan: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub passport_number: Option<String>,
    #[serde(rename = "voterID", deserialize_with = "lenient::text")]
    pub voter_id: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub driving_license: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub uid_number: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreditScore {
    #[serde(deserialize_with = "lenient::number")]
    pub bureau_score: Option<f64>,
    #[serde(deserialize_with = "lenient::text")]
    pub confidence_level: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub score_name: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub score_date: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub score_card_name: Option<String>,
    #[serde(deserialize_with = "lenient::text_list")]
    pub reason_codes: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReportSummary {
    #[serde(deserialize_with = "lenient::number")]
    pub total_accounts: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub active_accounts: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub closed_accounts: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub default_accounts: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub current_balance: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub secured_amount: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub unsecured_amount: Option<f64>,
    #[serde(rename = "last7DaysEnquiries", deserialize_with = "lenient::number")]
    pub last_7_days_enquiries: Option<f64>,
    #[serde(rename = "last30DaysEnquiries", deserialize_with = "lenient::number")]
    pub last_30_days_enquiries: Option<f64>,
    #[serde(rename = "last90DaysEnquiries", deserialize_with = "lenient::number")]
    pub last_90_days_enquiries: Option<f64>,
    #[serde(rename = "last180DaysEnquiries", deserialize_with = "lenient::number")]
    pub last_180_days_enquiries: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreditAccountsInformation {
    #[serde(deserialize_with = "lenient::number")]
    pub total_credit_cards: Option<f64>,
    #[serde(deserialize_with = "lenient::text_list")]
    pub banks_of_credit_cards: Vec<String>,
    #[serde(deserialize_with = "lenient::text_list")]
    pub addresses: Vec<String>,
    #[serde(deserialize_with = "lenient::list")]
    pub accounts: Vec<Account>,
}

/// One tradeline from the bureau report
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Account {
    #[serde(deserialize_with = "lenient::text")]
    pub subscriber_name: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub account_type: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub portfolio_type: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub ownership_indicator: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub account_number: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub account_status: Option<String>,
    #[serde(deserialize_with = "lenient::number")]
    pub current_balance: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub amount_overdue: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub credit_limit: Option<f64>,
    #[serde(deserialize_with = "lenient::text")]
    pub open_date: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub date_reported: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub date_closed: Option<String>,
    #[serde(deserialize_with = "lenient::number")]
    pub emi: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub interest_rate: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub repayment_tenure: Option<f64>,
    #[serde(deserialize_with = "lenient::text")]
    pub payment_rating: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub payment_rating_description: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub suit_filed: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub payment_history: Option<String>,
    #[serde(deserialize_with = "lenient::group")]
    pub holder_details: Option<HolderDetails>,
    #[serde(deserialize_with = "lenient::group")]
    pub address_details: Option<AddressDetails>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HolderDetails {
    #[serde(deserialize_with = "lenient::text")]
    pub full_name: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub pan: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AddressDetails {
    #[serde(deserialize_with = "lenient::text")]
    pub full_address: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Enquiry {
    #[serde(deserialize_with = "lenient::text")]
    pub subscriber: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub enquiry_purpose: Option<String>,
    #[serde(deserialize_with = "lenient::number")]
    pub enquiry_amount: Option<f64>,
    #[serde(deserialize_with = "lenient::text")]
    pub enquiry_date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Metadata {
    #[serde(deserialize_with = "lenient::text")]
    pub report_date: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub report_time: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub report_number: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub version: Option<String>,
}

// ============================================================================
// UPLOAD RESPONSE
// ============================================================================

/// Body of `POST /api/upload`, on success and on rejection alike
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UploadResponse {
    #[serde(deserialize_with = "lenient::text")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient::number")]
    pub credit_score: Option<f64>,
    #[serde(deserialize_with = "lenient::text")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient::number")]
    pub accounts_count: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub credit_cards_count: Option<f64>,
    #[serde(deserialize_with = "lenient::text")]
    pub error: Option<String>,
}

// ============================================================================
// LENIENT DECODING
// A field of the wrong shape decodes as absent instead of failing the record.
// ============================================================================

pub(crate) mod lenient {
    use super::*;
    use serde_json::Value;

    pub fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(value.as_ref().and_then(value_as_text))
    }

    pub fn number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(value.as_ref().and_then(value_as_number))
    }

    pub fn text_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(match value {
            Some(Value::Array(items)) => items.iter().filter_map(value_as_text).collect(),
            _ => Vec::new(),
        })
    }

    pub fn group<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(match value {
            Some(object @ Value::Object(_)) => decode_value(object),
            _ => None,
        })
    }

    pub fn list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(match value {
            Some(Value::Array(items)) => items
                .into_iter()
                .filter(Value::is_object)
                .filter_map(decode_value)
                .collect(),
            _ => Vec::new(),
        })
    }

    pub fn score<'de, D>(deserializer: D) -> Result<Option<ScoreField>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(match value {
            Some(object @ Value::Object(_)) => decode_value(object).map(ScoreField::Detail),
            Some(other) => value_as_number(&other).map(ScoreField::Value),
            None => None,
        })
    }

    fn decode_value<T: DeserializeOwned>(value: Value) -> Option<T> {
        match serde_json::from_value(value) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                tracing::debug!("Dropping malformed nested record: {}", e);
                None
            }
        }
    }

    pub(crate) fn value_as_text(value: &Value) -> Option<String> {
        match value {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    pub(crate) fn value_as_number(value: &Value) -> Option<f64> {
        match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().replace(',', "").parse().ok(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_list_item_decodes_summary_fields() {
        let report: Report = serde_json::from_value(json!({
            "_id": "abc123",
            "name": "Jane Doe",
            "pan": "ABCDE1234F",
            "creditScore": 720,
            "uploadedAt": "2026-10-19T12:00:00.000Z",
            "totalAccounts": 4,
            "totalCreditCards": 2,
            "currentBalance": 125000.5
        }))
        .unwrap();

        assert_eq!(report.id.as_deref(), Some("abc123"));
        assert_eq!(report.headline_score(), Some(720.0));
        assert!(report.score_details().is_none());
        assert_eq!(report.total_accounts, Some(4.0));
        assert!(report.basic_details.is_none());
        assert!(report.accounts().is_empty());
    }

    #[test]
    fn test_detail_record_decodes_nested_groups() {
        let report: Report = serde_json::from_value(json!({
            "_id": "abc123",
            "basicDetails": { "name": "Jane Doe", "voterID": "VOT123", "mobile": 9876543210u64 },
            "creditScore": { "bureauScore": 812, "reasonCodes": ["R1", "R2"] },
            "creditAccountsInformation": {
                "banksOfCreditCards": ["HDFC", "ICICI"],
                "accounts": [{ "subscriberName": "HDFC Bank", "currentBalance": "15,000" }]
            },
            "creditEnquiries": [{ "subscriber": "SBI", "enquiryAmount": 50000 }],
            "metadata": { "reportNumber": 1234, "version": "V2" }
        }))
        .unwrap();

        let details = report.basic_details.as_ref().unwrap();
        assert_eq!(details.voter_id.as_deref(), Some("VOT123"));
        assert_eq!(details.mobile.as_deref(), Some("9876543210"));
        assert_eq!(report.headline_score(), Some(812.0));
        assert_eq!(report.score_details().unwrap().reason_codes, vec!["R1", "R2"]);
        assert_eq!(report.accounts()[0].current_balance, Some(15000.0));
        assert_eq!(report.credit_enquiries.len(), 1);
        assert_eq!(
            report.metadata.unwrap().report_number.as_deref(),
            Some("1234")
        );
    }

    #[test]
    fn test_wrong_shapes_decode_as_absent() {
        let report: Report = serde_json::from_value(json!({
            "name": null,
            "creditScore": "not a score",
            "totalAccounts": { "oops": true },
            "basicDetails": "missing",
            "creditAccountsInformation": { "accounts": [1, "two", { "emi": 900 }] },
            "creditEnquiries": "none"
        }))
        .unwrap();

        assert!(report.name.is_none());
        assert!(report.credit_score.is_none());
        assert!(report.total_accounts.is_none());
        assert!(report.basic_details.is_none());
        assert_eq!(report.accounts().len(), 1);
        assert_eq!(report.accounts()[0].emi, Some(900.0));
        assert!(report.credit_enquiries.is_empty());
    }

    #[test]
    fn test_numeric_string_score() {
        let report: Report = serde_json::from_value(json!({ "creditScore": "745" })).unwrap();
        assert_eq!(report.headline_score(), Some(745.0));
    }

    #[test]
    fn test_upload_response() {
        let response: UploadResponse = serde_json::from_value(json!({
            "name": "Jane Doe",
            "creditScore": 720,
            "id": "abc123",
            "accountsCount": 4,
            "creditCardsCount": 2
        }))
        .unwrap();

        assert_eq!(response.name.as_deref(), Some("Jane Doe"));
        assert_eq!(response.credit_score, Some(720.0));
        assert!(response.error.is_none());
    }
}
