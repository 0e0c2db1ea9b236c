//! Printed prefixes and localized labels for bill type codes.

use crate::congress::Lang;

use super::error::DerivationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BillType {
    pub code: &'static str,
    /// Printed prefix ("H.R.", "S.J.Res.")
    pub display: &'static str,
    pub label_en: &'static str,
    pub label_zh: &'static str,
}

const BILL_TYPES: &[BillType] = &[
    BillType {
        code: "sres",
        display: "S.Res.",
        label_en: "Resolution",
        label_zh: "決議案",
    },
    BillType {
        code: "hres",
        display: "H.Res.",
        label_en: "Resolution",
        label_zh: "決議案",
    },
    BillType {
        code: "hjres",
        display: "H.J.Res.",
        label_en: "Joint Resolution",
        label_zh: "聯合決議案",
    },
    BillType {
        code: "sjres",
        display: "S.J.Res.",
        label_en: "Joint Resolution",
        label_zh: "聯合決議案",
    },
    BillType {
        code: "hconres",
        display: "H.Con.Res.",
        label_en: "Concurrent Resolution",
        label_zh: "共同決議案",
    },
    BillType {
        code: "sconres",
        display: "S.Con.Res.",
        label_en: "Concurrent Resolution",
        label_zh: "共同決議案",
    },
    BillType {
        code: "s",
        display: "S.",
        label_en: "Bill",
        label_zh: "法案",
    },
    BillType {
        code: "hr",
        display: "H.R.",
        label_en: "Bill",
        label_zh: "法案",
    },
];

impl BillType {
    /// Look up a bill type by its short code.
    ///
    /// # Errors
    ///
    /// Returns [`DerivationError::UnknownBillType`] for codes outside the table.
    pub fn lookup(code: &str) -> Result<&'static Self, DerivationError> {
        BILL_TYPES
            .iter()
            .find(|t| t.code == code)
            .ok_or_else(|| DerivationError::UnknownBillType(code.to_string()))
    }

    #[must_use]
    pub const fn label(&self, lang: Lang) -> &'static str {
        match lang {
            Lang::En => self.label_en,
            Lang::Zh => self.label_zh,
        }
    }

    /// Printed bill code, e.g. `"H.R. 1"`.
    #[must_use]
    pub fn code_display(&self, bill_number: &str) -> String {
        format!("{} {bill_number}", self.display)
    }
}
