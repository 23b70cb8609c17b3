//! Plain-text rendering of the home page.

use std::fmt;

use super::HomePage;
use crate::domain::registration::{FieldKey, FieldState, FormStatus};
use crate::domain::{PositionsState, RegistrationForm, ShowMore, User, UserListController};

const USERS_HEADING: &str = "Working with GET request";
const FORM_HEADING: &str = "Working with POST request";
const PHONE_HINT: &str = "+38 (XXX) XXX - XX - XX";
const PHOTO_PLACEHOLDER: &str = "Upload your photo";
const REGISTERED_NOTICE: &str = "User successfully registered";

/// Borrowed view that formats a [`HomePage`] as text.
#[derive(Debug, Clone, Copy)]
pub struct HomePageView<'a> {
    page: &'a HomePage,
}

impl<'a> HomePageView<'a> {
    pub(super) fn new(page: &'a HomePage) -> Self {
        Self { page }
    }
}

impl fmt::Display for HomePageView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_users(f, self.page.users())?;
        writeln!(f)?;
        write_form(f, self.page.form())
    }
}

fn write_users(f: &mut fmt::Formatter<'_>, list: &UserListController) -> fmt::Result {
    writeln!(f, "{USERS_HEADING}")?;
    if list.users().is_empty() && !list.is_loading() && list.last_failure().is_none() {
        writeln!(f, "  No users yet.")?;
    }
    for user in list.users() {
        write_card(f, user)?;
    }
    match list.show_more() {
        ShowMore::Enabled => writeln!(f, "[Show more]")?,
        ShowMore::Busy => writeln!(f, "[Loading...]")?,
        ShowMore::Hidden => {}
    }
    if let Some(failure) = list.last_failure() {
        writeln!(
            f,
            "! Could not load page {}: {} [Retry]",
            failure.page, failure.error
        )?;
    }
    Ok(())
}

fn write_card(f: &mut fmt::Formatter<'_>, user: &User) -> fmt::Result {
    writeln!(f, "- {}", user.name)?;
    writeln!(f, "  {}", user.position)?;
    writeln!(f, "  {}", user.email)?;
    writeln!(f, "  {}", user.phone)
}

fn write_form(f: &mut fmt::Formatter<'_>, form: &RegistrationForm) -> fmt::Result {
    writeln!(f, "{FORM_HEADING}")?;
    write_text_field(f, "Your name", form.name(), form, FieldKey::Name, None)?;
    write_text_field(f, "Email", form.email(), form, FieldKey::Email, None)?;
    write_text_field(f, "Phone", form.phone(), form, FieldKey::Phone, Some(PHONE_HINT))?;
    write_positions(f, form)?;
    write_photo(f, form)?;

    if let Some(message) = form.banner() {
        writeln!(f, "! {message} [Dismiss]")?;
    }
    if *form.status() == FormStatus::Succeeded {
        writeln!(f, "{REGISTERED_NOTICE}")?;
    }
    let button = match (form.status(), form.can_submit()) {
        (FormStatus::Submitting, _) => "[Submitting...]",
        (_, true) => "[Sign up]",
        (_, false) => "[Sign up] (disabled)",
    };
    writeln!(f, "{button}")
}

fn write_text_field(
    f: &mut fmt::Formatter<'_>,
    label: &str,
    field: &FieldState<String>,
    form: &RegistrationForm,
    key: FieldKey,
    hint: Option<&str>,
) -> fmt::Result {
    writeln!(f, "{label}: {}", field.value())?;
    match (form.field_error(key), hint) {
        (Some(error), _) => writeln!(f, "  ! {error}"),
        (None, Some(hint)) => writeln!(f, "  {hint}"),
        (None, None) => Ok(()),
    }
}

fn write_positions(f: &mut fmt::Formatter<'_>, form: &RegistrationForm) -> fmt::Result {
    writeln!(f, "Select your position")?;
    match form.positions() {
        PositionsState::Loading => writeln!(f, "  Loading positions...")?,
        PositionsState::Failed(error) => {
            writeln!(f, "  ! Could not load positions: {error} [Retry]")?;
        }
        PositionsState::Ready(positions) => {
            let selected = *form.position().value();
            for position in positions {
                let mark = if selected == Some(position.id) { "x" } else { " " };
                writeln!(f, "  ({mark}) {}", position.name)?;
            }
        }
    }
    if let Some(error) = form.field_error(FieldKey::Position) {
        writeln!(f, "  ! {error}")?;
    }
    Ok(())
}

fn write_photo(f: &mut fmt::Formatter<'_>, form: &RegistrationForm) -> fmt::Result {
    let shown = form.photo().value().file_name().unwrap_or(PHOTO_PLACEHOLDER);
    writeln!(f, "Photo: {shown}")?;
    if let Some(error) = form.field_error(FieldKey::Photo) {
        writeln!(f, "  ! {error}")?;
    }
    Ok(())
}
