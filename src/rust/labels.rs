//! Fixed user-facing text of the prediction form.

use crate::catalog::PredictionLabel;

pub const PAGE_HEADING: &str = "Dự đoán Tweet thảm họa";
pub const FORM_TITLE: &str = "Dự đoán Tweet có liên quan đến thảm họa";
pub const FORM_DESCRIPTION: &str = "Vui lòng nhập nội dung tweet và chọn mô hình và loại đặc trưng để dự đoán xem tweet đó có chứa nội dung liên quan đến thảm họa hay không.";
pub const MODEL_PLACEHOLDER: &str = "Chọn model";
pub const FEATURE_PLACEHOLDER: &str = "Chọn cách trích xuất đặc trưng";
pub const SUBMIT_LABEL: &str = "Dự đoán";
pub const SUBMITTING_LABEL: &str = "Đang dự đoán...";
pub const RESULT_HEADING: &str = "Kết quả dự đoán:";
pub const ERROR_TITLE: &str = "Error";

/// Caption of the submit action for the given in-flight flag
pub fn submit_label(is_submitting: bool) -> &'static str {
    if is_submitting {
        SUBMITTING_LABEL
    } else {
        SUBMIT_LABEL
    }
}

/// Marker printed next to a result: an alert for disaster related tweets,
/// a neutral note otherwise
pub fn tone_marker(label: PredictionLabel) -> &'static str {
    if label.is_disaster() {
        "[!]"
    } else {
        "[i]"
    }
}
