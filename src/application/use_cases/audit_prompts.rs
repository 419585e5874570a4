//! Fixed instructions sent with every audit request.
//!
//! The business rules live here as prose; the model applies them and
//! nothing checks its answer locally.

pub const AUDIT_SYSTEM_INSTRUCTION: &str = "You are an automated Data Quality Auditor. Analyze the record for quality issues based on these rules: \
1. Any missing 'name' or 'city' is a 'MissingValue' (HIGH severity). \
2. Any 'spend_usd' value over $1000 is a 'LogicalError' (MEDIUM severity) unless 'is_premium' is True. \
3. Any record failing the rules above must be flagged. If all fields are valid, mark as 'Clean' (LOW severity).";

pub const USER_PROMPT_PREFIX: &str = "Audit this customer record: ";

pub fn build_user_prompt(record_json: &str) -> String {
    format!("{}{}", USER_PROMPT_PREFIX, record_json)
}
