//! Pure validation for the personal-info form.

/// Age brackets offered by the form, youngest first.
pub const AGE_GROUPS: [&str; 5] = ["Under 50", "50s", "60s", "70s", "80 or over"];

/// At least two characters after trimming.
pub fn validate_name(name: &str) -> Result<(), &'static str> {
    if name.trim().chars().count() < 2 {
        return Err("Please enter a name of at least 2 characters");
    }
    Ok(())
}

/// `local@domain.tld` with a 2+ character top-level domain and no
/// whitespace.
pub fn validate_email(email: &str) -> Result<(), &'static str> {
    const MESSAGE: &str = "Please enter a valid email address";
    let email = email.trim();
    if email.contains(char::is_whitespace) {
        return Err(MESSAGE);
    }
    let mut parts = email.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(MESSAGE);
    };
    if local.is_empty() {
        return Err(MESSAGE);
    }
    let tld_ok = domain
        .rfind('.')
        .is_some_and(|dot| dot > 0 && domain.len() - dot > 2);
    if !tld_ok {
        return Err(MESSAGE);
    }
    Ok(())
}

/// Optional field: empty passes, otherwise digits and dashes only.
pub fn validate_phone(phone: &str) -> Result<(), &'static str> {
    let phone = phone.trim();
    if phone.is_empty() {
        return Ok(());
    }
    if !phone.chars().all(|c| c.is_ascii_digit() || c == '-') {
        return Err("Please enter a valid phone number");
    }
    Ok(())
}
