use serde::{Deserialize, Serialize};
use std::fmt;

pub mod format;
pub mod justificatif;
mod lenient;

pub use format::{format_date, format_status, FormatError};
pub use justificatif::{file_name_from_path, is_acceptable_file};
pub use lenient::parse_integer;

/// Session record type for employees, the only role allowed on bill pages
pub const EMPLOYEE: &str = "Employee";

/// Default VAT percentage applied when the form leaves it empty
pub const DEFAULT_PCT: i64 = 20;

/// One expense report record as held by the remote store.
///
/// Records listed back from the store can be incomplete drafts (a file was
/// attached but the form was never submitted), so every field but `id`
/// falls back to its default when missing or `null`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    /// Identifier assigned by the store on the first create call
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Owning user's email, taken from the session
    #[serde(default, deserialize_with = "lenient::nullable")]
    pub email: String,
    /// Category label, see [`ExpenseType`]
    #[serde(rename = "type", default, deserialize_with = "lenient::nullable")]
    pub expense_type: String,
    #[serde(default, deserialize_with = "lenient::nullable")]
    pub name: String,
    /// Integer currency amount
    #[serde(default, deserialize_with = "lenient::integer")]
    pub amount: i64,
    /// ISO 8601 `YYYY-MM-DD`, so lexical and chronological order agree
    #[serde(default, deserialize_with = "lenient::nullable")]
    pub date: String,
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub vat: Option<f64>,
    #[serde(default, deserialize_with = "lenient::integer")]
    pub pct: i64,
    #[serde(default, deserialize_with = "lenient::nullable")]
    pub commentary: String,
    #[serde(default)]
    pub file_url: Option<String>,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::nullable")]
    pub status: BillStatus,
    /// Reviewer annotations, empty until an administrator reviews the bill
    #[serde(default, deserialize_with = "lenient::annotations")]
    pub comment_admin: Vec<String>,
}

/// Review state of a bill.
///
/// Carried on the wire as its raw string; values this client does not know
/// survive a round trip unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BillStatus {
    #[default]
    Pending,
    Accepted,
    Refused,
    Other(String),
}

impl BillStatus {
    pub fn as_str(&self) -> &str {
        match self {
            BillStatus::Pending => "pending",
            BillStatus::Accepted => "accepted",
            BillStatus::Refused => "refused",
            BillStatus::Other(raw) => raw,
        }
    }
}

impl From<String> for BillStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "pending" => BillStatus::Pending,
            "accepted" => BillStatus::Accepted,
            "refused" => BillStatus::Refused,
            _ => BillStatus::Other(raw),
        }
    }
}

impl From<BillStatus> for String {
    fn from(status: BillStatus) -> Self {
        match status {
            BillStatus::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for BillStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Expense categories offered by the new bill form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpenseType {
    Transports,
    RestaurantsEtBars,
    HotelEtLogement,
    ServicesEnLigne,
    ItEtElectronique,
    EquipementEtMateriel,
    FournituresDeBureau,
}

impl ExpenseType {
    /// All categories in the order the form lists them
    pub const ALL: [ExpenseType; 7] = [
        ExpenseType::Transports,
        ExpenseType::RestaurantsEtBars,
        ExpenseType::HotelEtLogement,
        ExpenseType::ServicesEnLigne,
        ExpenseType::ItEtElectronique,
        ExpenseType::EquipementEtMateriel,
        ExpenseType::FournituresDeBureau,
    ];

    /// Label stored in the bill's `type` field
    pub fn label(&self) -> &'static str {
        match self {
            ExpenseType::Transports => "Transports",
            ExpenseType::RestaurantsEtBars => "Restaurants et bars",
            ExpenseType::HotelEtLogement => "Hôtel et logement",
            ExpenseType::ServicesEnLigne => "Services en ligne",
            ExpenseType::ItEtElectronique => "IT et électronique",
            ExpenseType::EquipementEtMateriel => "Equipement et matériel",
            ExpenseType::FournituresDeBureau => "Fournitures de bureau",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.label() == label)
    }
}

/// A bill ready for display: the raw record plus its formatted strings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedBill {
    #[serde(flatten)]
    pub bill: Bill,
    pub formatted_date: String,
    pub formatted_status: String,
}

impl FormattedBill {
    /// Format `bill` for display.
    ///
    /// An unparsable date is kept raw and the error is handed back beside the
    /// result so the caller can report it; the record itself is never lost.
    pub fn from_bill(bill: Bill) -> (Self, Option<FormatError>) {
        let formatted_status = format_status(&bill.status);
        let (formatted_date, error) = match format_date(&bill.date) {
            Ok(date) => (date, None),
            Err(e) => (bill.date.clone(), Some(e)),
        };

        (
            Self {
                bill,
                formatted_date,
                formatted_status,
            },
            error,
        )
    }
}

/// Response of the store's create call for a freshly attached justificatif
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedBill {
    /// Draft identifier; the bills API names it `key`
    #[serde(alias = "key")]
    pub id: String,
    pub file_url: String,
    #[serde(default)]
    pub file_name: Option<String>,
}

/// The `user` record kept in local storage by the login page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    #[serde(rename = "type")]
    pub user_type: String,
    #[serde(default, deserialize_with = "lenient::nullable")]
    pub email: String,
}

impl SessionUser {
    pub fn is_employee(&self) -> bool {
        self.user_type == EMPLOYEE
    }
}

/// Error body returned by the bills API on a non-2xx response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}
