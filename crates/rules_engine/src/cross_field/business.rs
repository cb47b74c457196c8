//! Business rules: fixed, named checks over well-known field names.

use crate::CheckOutcome;
use crate::coercion::{is_blank, is_truthy, numeric};
use rules_core::{BusinessRule, BusinessRuleConfig, Record};

/// Employment statuses accepted by the salary verification rule.
pub const EMPLOYMENT_STATUSES: [&str; 5] =
    ["employed", "self-employed", "retired", "unemployed", "student"];

const ADULT_AGE: f64 = 18.0;
const SALARY_VERIFICATION_THRESHOLD: f64 = 100_000.0;

pub(super) fn validate(config: &BusinessRuleConfig, record: &Record) -> CheckOutcome {
    match config.business_rule {
        Some(BusinessRule::AgeVerification) => age_verification(record),
        Some(BusinessRule::EmailPhoneRequired) => email_phone_required(record),
        Some(BusinessRule::MinorsConsent) => minors_consent(record),
        Some(BusinessRule::SalaryVerification) => salary_verification(record),
        Some(BusinessRule::Unknown) | None => CheckOutcome::pass(),
    }
}

fn age_verification(record: &Record) -> CheckOutcome {
    let adult = numeric(record.get("age")).is_some_and(|age| age >= ADULT_AGE);
    let documented =
        !is_blank(record.get("idType")) && !is_blank(record.get("verificationDocument"));

    CheckOutcome::check(!adult || documented, || {
        "ID type and verification document are required for users 18 and older".to_string()
    })
}

fn email_phone_required(record: &Record) -> CheckOutcome {
    let reachable = !is_blank(record.get("email")) || !is_blank(record.get("phone"));
    CheckOutcome::check(reachable, || {
        "Either email or phone number is required".to_string()
    })
}

fn minors_consent(record: &Record) -> CheckOutcome {
    let minor = numeric(record.get("age")).is_some_and(|age| age < ADULT_AGE);
    if !minor {
        return CheckOutcome::pass();
    }

    if !is_truthy(record.get("guardianConsent")) {
        return CheckOutcome::fail("Guardian consent is required for users under 18");
    }

    if is_blank(record.get("guardianEmail")) {
        return CheckOutcome::fail("Guardian email is required for users under 18");
    }

    CheckOutcome::pass()
}

fn salary_verification(record: &Record) -> CheckOutcome {
    let Some(salary) = numeric(record.get("salary")) else {
        return CheckOutcome::pass();
    };

    if salary > SALARY_VERIFICATION_THRESHOLD && !is_truthy(record.get("salaryVerification")) {
        return CheckOutcome::fail("Salary verification is required for salaries above 100000");
    }

    if salary > 0.0 {
        let status = record.get("employmentStatus").and_then(|v| v.as_str());
        if !status.is_some_and(|status| EMPLOYMENT_STATUSES.contains(&status)) {
            return CheckOutcome::fail(format!(
                "Employment status must be one of: {}",
                EMPLOYMENT_STATUSES.join(", ")
            ));
        }
    }

    CheckOutcome::pass()
}
