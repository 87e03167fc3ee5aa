//! Field-level validation rules for the user form.
//!
//! Everything here is pure: [`validate`] maps a [`UserDraft`] to the set of
//! currently invalid fields. A field absent from [`FieldErrors`] is valid.

use std::collections::BTreeMap;

use validator::{ValidateEmail, ValidateUrl};

use crate::api::{Address, Company, User, UserPayload};

/// Editable fields of the user form, in display order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Name,
    Email,
    Phone,
    Username,
    Street,
    City,
    CompanyName,
    Website,
}

impl Field {
    pub const ALL: [Field; 8] = [
        Field::Name,
        Field::Email,
        Field::Phone,
        Field::Username,
        Field::Street,
        Field::City,
        Field::CompanyName,
        Field::Website,
    ];

    /// Path of the field in the user record shape.
    pub fn path(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Phone => "phone",
            Field::Username => "username",
            Field::Street => "address.street",
            Field::City => "address.city",
            Field::CompanyName => "companyName",
            Field::Website => "website",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Email => "Email",
            Field::Phone => "Phone",
            Field::Username => "Username",
            Field::Street => "Street",
            Field::City => "City",
            Field::CompanyName => "Company Name",
            Field::Website => "Website",
        }
    }
}

/// In-progress form values.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UserDraft {
    pub name: String,
    pub username: String,
    pub email: String,
    pub phone: String,
    pub street: String,
    pub city: String,
    pub company_name: String,
    pub website: String,
}

impl UserDraft {
    pub fn from_user(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            username: user.username.clone(),
            email: user.email.clone(),
            phone: user.phone.clone(),
            street: user.address.street.clone(),
            city: user.address.city.clone(),
            company_name: user.company.name.clone(),
            website: user.website.clone(),
        }
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Phone => &self.phone,
            Field::Username => &self.username,
            Field::Street => &self.street,
            Field::City => &self.city,
            Field::CompanyName => &self.company_name,
            Field::Website => &self.website,
        }
    }

    pub fn get_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Phone => &mut self.phone,
            Field::Username => &mut self.username,
            Field::Street => &mut self.street,
            Field::City => &mut self.city,
            Field::CompanyName => &mut self.company_name,
            Field::Website => &mut self.website,
        }
    }

    pub fn to_payload(&self, id: Option<u64>) -> UserPayload {
        UserPayload {
            id,
            name: self.name.clone(),
            username: self.username.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            website: self.website.clone(),
            company: Company { name: self.company_name.clone() },
            address: Address { street: self.street.clone(), city: self.city.clone() },
        }
    }
}

pub type FieldErrors = BTreeMap<Field, &'static str>;

/// Evaluate every rule against `draft`.
pub fn validate(draft: &UserDraft) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if draft.name.is_empty() {
        errors.insert(Field::Name, "Name is required");
    } else if draft.name.chars().count() < 3 {
        errors.insert(Field::Name, "Name must be at least 3 characters");
    }

    if draft.email.is_empty() {
        errors.insert(Field::Email, "Email is required");
    } else if !draft.email.as_str().validate_email() {
        errors.insert(Field::Email, "Invalid email format");
    }

    if draft.phone.is_empty() {
        errors.insert(Field::Phone, "Phone number is required");
    } else if !is_valid_phone(&draft.phone) {
        errors.insert(Field::Phone, "Phone number must be valid");
    }

    if draft.street.is_empty() {
        errors.insert(Field::Street, "Street address is required");
    }
    if draft.city.is_empty() {
        errors.insert(Field::City, "City is required");
    }

    if !draft.company_name.is_empty() && draft.company_name.chars().count() < 3 {
        errors.insert(Field::CompanyName, "Company Name must be at least 3 characters");
    }

    if !draft.website.is_empty() && !is_valid_website(&draft.website) {
        errors.insert(Field::Website, "Invalid URL format");
    }

    errors
}

/// Absolute URLs, or bare host names such as `hildegard.org` (read as `http://`).
pub fn is_valid_website(input: &str) -> bool {
    let input = input.trim();
    if input.contains("://") {
        return input.validate_url();
    }
    let host = input.split(['/', '?', '#']).next().unwrap_or_default();
    host.contains('.') && format!("http://{input}").as_str().validate_url()
}

const PHONE_MIN_DIGITS: usize = 7;
const PHONE_MAX_DIGITS: usize = 15;

/// Lenient, locale-agnostic phone check.
///
/// Accepts an optional leading `+`, digits with `space - . ( )` separators and an
/// optional extension (`x123`, `ext 123`, `ext. 123`).
pub fn is_valid_phone(input: &str) -> bool {
    let lower = input.trim().to_ascii_lowercase();
    let (number, extension) = split_extension(&lower);

    if let Some(ext) = extension {
        let ext = ext.trim();
        if ext.is_empty() || !ext.chars().all(|c| c.is_ascii_digit()) {
            return false;
        }
    }

    let number = number.trim();
    let body = number.strip_prefix('+').unwrap_or(number);
    let mut digits = 0usize;
    for c in body.chars() {
        match c {
            '0'..='9' => digits += 1,
            ' ' | '-' | '.' | '(' | ')' => {}
            _ => return false,
        }
    }
    (PHONE_MIN_DIGITS..=PHONE_MAX_DIGITS).contains(&digits)
}

fn split_extension(s: &str) -> (&str, Option<&str>) {
    for marker in ["ext.", "ext", "x"] {
        if let Some(pos) = s.find(marker) {
            return (&s[..pos], Some(&s[pos + marker.len()..]));
        }
    }
    (s, None)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_draft() -> UserDraft {
        UserDraft {
            name: "Ada Lovelace".into(),
            username: "USER-AB12C".into(),
            email: "ada@example.com".into(),
            phone: "+44 20 7946 0958".into(),
            street: "1 Analytical Way".into(),
            city: "London".into(),
            company_name: String::new(),
            website: String::new(),
        }
    }

    #[test]
    fn valid_draft_has_no_errors() {
        assert!(validate(&valid_draft()).is_empty());
    }

    #[test]
    fn name_length_boundary() {
        let mut d = valid_draft();
        d.name = "Al".into();
        assert_eq!(validate(&d).get(&Field::Name), Some(&"Name must be at least 3 characters"));
        d.name = "Ali".into();
        assert!(validate(&d).is_empty());
        d.name.clear();
        assert_eq!(validate(&d).get(&Field::Name), Some(&"Name is required"));
    }

    #[test]
    fn email_shape() {
        let mut d = valid_draft();
        d.email = "not-an-email".into();
        assert_eq!(validate(&d).get(&Field::Email), Some(&"Invalid email format"));
        d.email = "a@b.com".into();
        assert!(!validate(&d).contains_key(&Field::Email));
    }

    #[test]
    fn website_is_optional_but_checked_when_present() {
        let mut d = valid_draft();
        assert!(!validate(&d).contains_key(&Field::Website));
        d.website = "not a url".into();
        assert_eq!(validate(&d).get(&Field::Website), Some(&"Invalid URL format"));
        d.website = "https://example.com".into();
        assert!(!validate(&d).contains_key(&Field::Website));
        d.website = "hildegard.org".into();
        assert!(!validate(&d).contains_key(&Field::Website));
    }

    #[test]
    fn company_name_optional_min_three() {
        let mut d = valid_draft();
        d.company_name = "AB".into();
        assert!(validate(&d).contains_key(&Field::CompanyName));
        d.company_name = "ABC".into();
        assert!(validate(&d).is_empty());
    }

    #[test]
    fn address_parts_required() {
        let mut d = valid_draft();
        d.street.clear();
        d.city.clear();
        let errs = validate(&d);
        assert_eq!(errs.get(&Field::Street), Some(&"Street address is required"));
        assert_eq!(errs.get(&Field::City), Some(&"City is required"));
    }

    #[test]
    fn phone_grammar_is_lenient() {
        for ok in [
            "5551234567",
            "+1 (555) 123-4567",
            "1-770-736-8031 x56442",
            "010-692-6593 x09125",
            "024-648-3804",
            "+49.30.1234567",
            "555 123 4567 ext. 12",
        ] {
            assert!(is_valid_phone(ok), "{ok} should be accepted");
        }
        for bad in ["12345", "phone", "555-CALL-NOW", "+1 555 123 4567 x", "1234567890123456"] {
            assert!(!is_valid_phone(bad), "{bad} should be rejected");
        }
    }

    #[test]
    fn field_paths_follow_record_shape() {
        assert_eq!(Field::Street.path(), "address.street");
        assert_eq!(Field::CompanyName.path(), "companyName");
    }
}
