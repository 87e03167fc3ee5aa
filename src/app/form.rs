//! State of the create/edit user form modal.
//!
//! The form owns its draft, touched set and errors. It never talks to the
//! service: a successful [`FormState::try_submit`] hands a [`FormSubmission`]
//! back to the list screen, which issues the call and later closes the form.

use std::collections::BTreeSet;

use rand::Rng;
use tracing::debug;

use crate::api::{User, UserPayload};
use crate::validation::{self, Field, FieldErrors, UserDraft};

const USERNAME_PREFIX: &str = "USER-";
const USERNAME_ALPHABET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const USERNAME_SUFFIX_LEN: usize = 5;

/// Default username for new users: `USER-` followed by 5 uppercase base-36 chars.
pub fn generate_username<R: Rng>(rng: &mut R) -> String {
    let suffix: String = (0..USERNAME_SUFFIX_LEN)
        .map(|_| USERNAME_ALPHABET[rng.gen_range(0..USERNAME_ALPHABET.len())] as char)
        .collect();
    format!("{USERNAME_PREFIX}{suffix}")
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit { id: u64 },
}

/// What the list screen should send to the service.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormSubmission {
    Create(UserPayload),
    Update { id: u64, payload: UserPayload },
}

#[derive(Clone, Debug)]
pub struct FormState {
    pub mode: FormMode,
    pub draft: UserDraft,
    pub touched: BTreeSet<Field>,
    pub errors: FieldErrors,
    pub focus: usize,
    pub submitting: bool,
    pub submit_error: Option<String>,
}

impl FormState {
    pub fn for_create() -> Self {
        Self::for_create_with_username(generate_username(&mut rand::thread_rng()))
    }

    pub fn for_create_with_username(username: String) -> Self {
        let draft = UserDraft { username, ..UserDraft::default() };
        Self::with_draft(FormMode::Create, draft)
    }

    pub fn for_edit(user: &User) -> Self {
        Self::with_draft(FormMode::Edit { id: user.id }, UserDraft::from_user(user))
    }

    fn with_draft(mode: FormMode, draft: UserDraft) -> Self {
        let errors = validation::validate(&draft);
        Self {
            mode,
            draft,
            touched: BTreeSet::new(),
            errors,
            focus: 0,
            submitting: false,
            submit_error: None,
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.mode, FormMode::Edit { .. })
    }

    pub fn title(&self) -> &'static str {
        if self.is_editing() { "Edit User" } else { "Create User" }
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_editing() { "Update User" } else { "Create User" }
    }

    pub fn focused(&self) -> Field {
        Field::ALL[self.focus]
    }

    /// Username is fixed once the record exists.
    pub fn is_editable(&self, field: Field) -> bool {
        !(field == Field::Username && self.is_editing())
    }

    /// Error to show next to `field`: only once the field has been touched.
    pub fn visible_error(&self, field: Field) -> Option<&'static str> {
        if self.touched.contains(&field) {
            self.errors.get(&field).copied()
        } else {
            None
        }
    }

    pub fn focus_next(&mut self) {
        self.touched.insert(self.focused());
        self.focus = (self.focus + 1) % Field::ALL.len();
    }

    pub fn focus_prev(&mut self) {
        self.touched.insert(self.focused());
        self.focus = (self.focus + Field::ALL.len() - 1) % Field::ALL.len();
    }

    pub fn input_char(&mut self, c: char) {
        if self.submitting || !self.is_editable(self.focused()) {
            return;
        }
        self.draft.get_mut(self.focused()).push(c);
        self.revalidate();
    }

    pub fn backspace(&mut self) {
        if self.submitting || !self.is_editable(self.focused()) {
            return;
        }
        self.draft.get_mut(self.focused()).pop();
        self.revalidate();
    }

    fn revalidate(&mut self) {
        self.errors = validation::validate(&self.draft);
    }

    /// Touch every field and, if the draft is valid and nothing is in flight,
    /// mark the form as submitting and return what to send.
    pub fn try_submit(&mut self) -> Option<FormSubmission> {
        if self.submitting {
            return None;
        }
        self.touched.extend(Field::ALL);
        self.revalidate();
        if !self.errors.is_empty() {
            let fields: Vec<&str> = self.errors.keys().map(|f| f.path()).collect();
            debug!(?fields, "form has validation errors");
            return None;
        }
        self.submitting = true;
        self.submit_error = None;
        Some(match self.mode {
            FormMode::Create => FormSubmission::Create(self.draft.to_payload(None)),
            FormMode::Edit { id } => FormSubmission::Update { id, payload: self.draft.to_payload(Some(id)) },
        })
    }

    /// The remote call failed: re-enable submission and keep the draft.
    pub fn submit_failed(&mut self, message: impl Into<String>) {
        self.submitting = false;
        self.submit_error = Some(message.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Address, Company};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn fill_valid(form: &mut FormState) {
        form.draft.name = "Grace Hopper".into();
        form.draft.email = "grace@navy.mil".into();
        form.draft.phone = "202-555-0147".into();
        form.draft.street = "Pier 1".into();
        form.draft.city = "Arlington".into();
        form.revalidate();
    }

    fn sample_user() -> User {
        User {
            id: 3,
            name: "Clementine Bauch".into(),
            username: "Samantha".into(),
            email: "Nathan@yesenia.net".into(),
            phone: "1-463-123-4447".into(),
            website: "https://ramiro.info".into(),
            company: Company { name: "Romaguera-Jacobson".into() },
            address: Address { street: "Douglas Extension".into(), city: "McKenziehaven".into() },
        }
    }

    #[test]
    fn generated_username_pattern() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..32 {
            let name = generate_username(&mut rng);
            let suffix = name.strip_prefix("USER-").expect("prefix");
            assert_eq!(suffix.len(), 5);
            assert!(suffix.chars().all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
        }
    }

    #[test]
    fn create_form_starts_empty_with_username() {
        let form = FormState::for_create();
        assert!(form.draft.name.is_empty());
        assert!(form.draft.username.starts_with("USER-"));
        assert!(form.is_editable(Field::Username));
        assert!(form.touched.is_empty());
    }

    #[test]
    fn edit_form_is_seeded_and_username_read_only() {
        let mut form = FormState::for_edit(&sample_user());
        assert_eq!(form.draft.company_name, "Romaguera-Jacobson");
        assert_eq!(form.draft.city, "McKenziehaven");
        form.focus = 3;
        assert_eq!(form.focused(), Field::Username);
        form.input_char('x');
        form.backspace();
        assert_eq!(form.draft.username, "Samantha");
    }

    #[test]
    fn errors_only_visible_after_touch() {
        let mut form = FormState::for_create();
        assert!(form.errors.contains_key(&Field::Name));
        assert_eq!(form.visible_error(Field::Name), None);
        form.focus_next();
        assert_eq!(form.visible_error(Field::Name), Some("Name is required"));
    }

    #[test]
    fn typing_revalidates() {
        let mut form = FormState::for_create();
        for c in "Bob".chars() {
            form.input_char(c);
        }
        assert!(!form.errors.contains_key(&Field::Name));
        form.backspace();
        assert_eq!(form.errors.get(&Field::Name), Some(&"Name must be at least 3 characters"));
    }

    #[test]
    fn invalid_submit_touches_everything_and_yields_nothing() {
        let mut form = FormState::for_create();
        assert!(form.try_submit().is_none());
        assert_eq!(form.touched.len(), Field::ALL.len());
        assert!(!form.submitting);
    }

    #[test]
    fn valid_create_submit_has_no_id_and_blocks_resubmit() {
        let mut form = FormState::for_create_with_username("USER-TEST1".into());
        fill_valid(&mut form);
        match form.try_submit() {
            Some(FormSubmission::Create(payload)) => {
                assert_eq!(payload.id, None);
                assert_eq!(payload.username, "USER-TEST1");
            }
            other => panic!("unexpected submission: {other:?}"),
        }
        assert!(form.submitting);
        assert!(form.try_submit().is_none());

        form.submit_failed("HTTP 500: boom");
        assert!(!form.submitting);
        assert!(form.try_submit().is_some());
    }

    #[test]
    fn edit_submit_is_keyed_by_record_id() {
        let mut form = FormState::for_edit(&sample_user());
        match form.try_submit() {
            Some(FormSubmission::Update { id, payload }) => {
                assert_eq!(id, 3);
                assert_eq!(payload.id, Some(3));
                assert_eq!(payload.company.name, "Romaguera-Jacobson");
            }
            other => panic!("unexpected submission: {other:?}"),
        }
    }
}
