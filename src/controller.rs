use crate::ExpirationError;
use crate::clock::{Clock, SystemClock};
use crate::config::ValidationPolicy;
use crate::cursor::{Direction, normalize_cursor, raw_index_to_value, step, value_index_to_raw};
use crate::mask::{get_raw, set_value};
use crate::prelude::*;
use crate::state::FieldState;
use crate::types::{ExpirationDate, RawValue};

/// Identifies the form section an error belongs to
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Deref, From, Into)]
pub struct FieldScope(String);

impl From<&str> for FieldScope {
    fn from(scope: &str) -> Self {
        Self(scope.to_owned())
    }
}

/// Where validation errors are shown. Implemented by the surrounding form.
pub trait ErrorDisplay {
    fn clear_error(&mut self, scope: &FieldScope);
    fn set_error(&mut self, scope: &FieldScope, error: ExpirationError);
}

impl<T: ErrorDisplay + ?Sized> ErrorDisplay for &mut T {
    fn clear_error(&mut self, scope: &FieldScope) {
        (**self).clear_error(scope);
    }

    fn set_error(&mut self, scope: &FieldScope, error: ExpirationError) {
        (**self).set_error(scope, error);
    }
}

/// Keys the controller handles itself
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Backspace,
    Delete,
    Other,
}

impl From<&str> for Key {
    /// Maps a DOM `KeyboardEvent.key` name
    fn from(name: &str) -> Self {
        match name {
            "ArrowLeft" => Self::ArrowLeft,
            "ArrowRight" => Self::ArrowRight,
            "Backspace" => Self::Backspace,
            "Delete" => Self::Delete,
            _ => Self::Other,
        }
    }
}

/// A single interaction with the field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldEvent {
    /// Text is about to be inserted; `data` is what the user typed or
    /// pasted. Only its ASCII digits are kept.
    BeforeInput { data: Option<String> },
    /// The value changed through another path (paste, autofill). The new
    /// text is already in the state passed to `handle`.
    Input,
    Focus,
    Blur,
    KeyDown(Key),
}

impl FieldEvent {
    /// Whether the binding layer must cancel the widget's native behavior
    pub const fn prevents_default(&self) -> bool {
        match self {
            Self::BeforeInput { .. } => true,
            Self::KeyDown(key) => !matches!(key, Key::Other),
            Self::Input | Self::Focus | Self::Blur => false,
        }
    }
}

/// Controller for one expiration field.
///
/// Each call to [`handle`](Self::handle) takes the widget state, applies one
/// event and returns the state to write back.
#[derive(Debug)]
pub struct ExpirationField<E, C = SystemClock> {
    scope:  FieldScope,
    errors: E,
    clock:  C,
    policy: ValidationPolicy,
}

impl<E: ErrorDisplay> ExpirationField<E> {
    /// Creates a controller that validates against the system clock
    pub fn new(scope: impl Into<FieldScope>, errors: E) -> Self {
        Self {
            scope: scope.into(),
            errors,
            clock: SystemClock,
            policy: ValidationPolicy::default(),
        }
    }
}

impl<E: ErrorDisplay, C: Clock> ExpirationField<E, C> {
    /// Replaces the clock used for validation
    pub fn with_clock<C2: Clock>(self, clock: C2) -> ExpirationField<E, C2> {
        ExpirationField {
            scope: self.scope,
            errors: self.errors,
            clock,
            policy: self.policy,
        }
    }

    #[must_use]
    pub fn with_policy(mut self, policy: ValidationPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub const fn scope(&self) -> &FieldScope {
        &self.scope
    }

    pub const fn policy(&self) -> &ValidationPolicy {
        &self.policy
    }

    pub const fn errors(&self) -> &E {
        &self.errors
    }

    /// Applies `event` to `state` and returns the resulting state
    pub fn handle(&mut self, state: &FieldState, event: &FieldEvent) -> FieldState {
        trace!("{}: {event:?} at {}", self.scope, state.cursor_start);
        match event {
            FieldEvent::BeforeInput { data } => self.before_input(state, data.as_deref()),
            FieldEvent::Input => self.input(state),
            FieldEvent::Focus => focus(state),
            FieldEvent::Blur => {
                self.blur(state);
                state.clone()
            }
            FieldEvent::KeyDown(Key::ArrowLeft) => move_cursor(state, Direction::Left),
            FieldEvent::KeyDown(Key::ArrowRight) => move_cursor(state, Direction::Right),
            FieldEvent::KeyDown(Key::Backspace) => self.backspace(state),
            FieldEvent::KeyDown(Key::Delete) => self.delete(state),
            FieldEvent::KeyDown(Key::Other) => state.clone(),
        }
    }

    /// Validates the current value without touching the error display
    ///
    /// # Errors
    /// Returns the same error a blur would surface.
    pub fn validate(&self, state: &FieldState) -> Result<ExpirationDate, ExpirationError> {
        self.policy
            .validate(&get_raw(&state.value), self.clock.today())
    }

    fn before_input(&mut self, state: &FieldState, data: Option<&str>) -> FieldState {
        let Some(text) = data.filter(|text| text.chars().any(|c| c.is_ascii_digit())) else {
            trace!("{}: suppressing non-digit input {data:?}", self.scope);
            return state.clone();
        };
        self.errors.clear_error(&self.scope);

        let raw = get_raw(&state.value);
        let raw_cursor = caret_raw_index(state, &raw);
        let Some((next, inserted)) = raw.insert_digits(raw_cursor, text) else {
            debug!("{}: value full, discarding {text:?}", self.scope);
            return state.clone();
        };

        debug!("{}: inserted {inserted} digit(s) at {raw_cursor} -> {next}", self.scope);
        set_value(state, &next).with_cursor(raw_index_to_value(raw_cursor + inserted))
    }

    fn input(&mut self, state: &FieldState) -> FieldState {
        self.errors.clear_error(&self.scope);
        let mut next = set_value(state, &get_raw(&state.value));
        let len = next.value.len();
        next.cursor_start = next.cursor_start.min(len);
        next.cursor_end = next.cursor_end.min(len);
        next
    }

    fn blur(&mut self, state: &FieldState) {
        if let Err(error) = self.validate(state) {
            debug!("{}: {} ({})", self.scope, error, error.code());
            self.errors.set_error(&self.scope, error);
        }
    }

    fn backspace(&mut self, state: &FieldState) -> FieldState {
        let raw = get_raw(&state.value);
        let raw_cursor = caret_raw_index(state, &raw);
        if raw_cursor == 0 {
            return state.clone();
        }
        let Some(next) = raw.remove(raw_cursor - 1) else {
            return state.clone();
        };

        self.errors.clear_error(&self.scope);
        debug!("{}: removed digit {} -> {next}", self.scope, raw_cursor - 1);
        set_value(state, &next).with_cursor(raw_index_to_value(raw_cursor - 1))
    }

    fn delete(&mut self, state: &FieldState) -> FieldState {
        let raw = get_raw(&state.value);
        let raw_cursor = caret_raw_index(state, &raw);
        let Some(next) = raw.remove(raw_cursor) else {
            return state.clone();
        };

        self.errors.clear_error(&self.scope);
        debug!("{}: removed digit {raw_cursor} -> {next}", self.scope);
        set_value(state, &next).with_cursor(raw_index_to_value(raw_cursor))
    }
}

fn focus(state: &FieldState) -> FieldState {
    let pos = normalize_cursor(state.cursor_start).min(state.value.len());
    state.with_cursor(pos)
}

fn move_cursor(state: &FieldState, direction: Direction) -> FieldState {
    state.with_cursor(step(state.cursor_start, direction, state.value.len()))
}

/// Raw index under the caret, never past the last digit
fn caret_raw_index(state: &FieldState, raw: &RawValue) -> usize {
    value_index_to_raw(normalize_cursor(state.cursor_start)).min(raw.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{FixedClock, Today};

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Call {
        Clear(String),
        Set(String, ExpirationError),
    }

    #[derive(Debug, Default)]
    struct Recorder {
        calls: Vec<Call>,
    }

    impl ErrorDisplay for Recorder {
        fn clear_error(&mut self, scope: &FieldScope) {
            self.calls.push(Call::Clear(scope.to_string()));
        }

        fn set_error(&mut self, scope: &FieldScope, error: ExpirationError) {
            self.calls.push(Call::Set(scope.to_string(), error));
        }
    }

    impl Recorder {
        fn set_calls(&self) -> Vec<ExpirationError> {
            self.calls
                .iter()
                .filter_map(|call| match call {
                    Call::Set(_, err) => Some(*err),
                    Call::Clear(_) => None,
                })
                .collect()
        }
    }

    fn field() -> TestField {
        ExpirationField::new("expiration", Recorder::default())
            .with_clock(FixedClock(Today::new(2024, 6).unwrap()))
    }

    type TestField = ExpirationField<Recorder, FixedClock>;

    fn type_char(ctl: &mut TestField, state: &FieldState, c: &str) -> FieldState {
        ctl.handle(
            state,
            &FieldEvent::BeforeInput {
                data: Some(c.to_owned()),
            },
        )
    }

    fn key(ctl: &mut TestField, state: &FieldState, key: Key) -> FieldState {
        ctl.handle(state, &FieldEvent::KeyDown(key))
    }

    #[test]
    fn test_typing_four_digits() {
        let mut ctl = field();
        let mut state = FieldState::default();
        let expected = [("1", "1", 1), ("2", "12", 2), ("3", "12 / 3", 6), ("4", "12 / 34", 7)];

        for (c, value, cursor) in expected {
            state = type_char(&mut ctl, &state, c);
            assert_eq!(state.value, value, "after typing {c}");
            assert_eq!(state.cursor(), cursor, "after typing {c}");
            assert!(state.is_collapsed());
        }
    }

    #[test]
    fn test_fifth_digit_rejected() {
        let mut ctl = field();
        let state = FieldState::new("12 / 34", 7);
        let next = type_char(&mut ctl, &state, "5");
        assert_eq!(next, state);

        let next = type_char(&mut ctl, &FieldState::new("12 / 34", 0), "9");
        assert_eq!(next.value, "12 / 34");
        assert_eq!(next.cursor(), 0);
    }

    #[test]
    fn test_insert_in_middle() {
        let mut ctl = field();
        // caret between 1 and 3
        let next = type_char(&mut ctl, &FieldState::new("13", 1), "2");
        assert_eq!(next.value, "12 / 3");
        assert_eq!(next.cursor(), 2);
    }

    #[test]
    fn test_insert_with_cursor_inside_separator() {
        let mut ctl = field();
        let next = type_char(&mut ctl, &FieldState::new("12 / 4", 3), "3");
        assert_eq!(next.value, "12 / 34");
        assert_eq!(next.cursor(), 6);
    }

    #[test]
    fn test_non_digit_suppressed() {
        let mut ctl = field();
        let state = FieldState::new("12", 2);
        for data in [Some("a"), Some("/"), Some(" "), Some("ab/"), Some(""), None] {
            let event = FieldEvent::BeforeInput {
                data: data.map(str::to_owned),
            };
            assert!(event.prevents_default());
            assert_eq!(ctl.handle(&state, &event), state, "data {data:?}");
        }
        assert!(ctl.errors().calls.is_empty());
    }

    #[test]
    fn test_paste_into_empty_field() {
        let mut ctl = field();
        let event = FieldEvent::BeforeInput {
            data: Some("06/29".to_owned()),
        };
        let next = ctl.handle(&FieldState::default(), &event);
        assert_eq!(next.value, "06 / 29");
        assert_eq!(next.cursor(), 7);
        assert_eq!(ctl.errors().calls, vec![Call::Clear("expiration".to_owned())]);
    }

    #[test]
    fn test_paste_is_capped_at_four_digits() {
        let mut ctl = field();
        let next = type_char(&mut ctl, &FieldState::new("06", 2), "2029");
        assert_eq!(next.value, "06 / 20");
        assert_eq!(next.cursor(), 7);

        let full = FieldState::new("06 / 29", 0);
        assert_eq!(type_char(&mut ctl, &full, "11"), full);
    }

    #[test]
    fn test_paste_in_middle_keeps_cursor_after_insert() {
        let mut ctl = field();
        let next = type_char(&mut ctl, &FieldState::new("09", 1), "62");
        assert_eq!(next.value, "06 / 29");
        assert_eq!(next.cursor(), 6);
    }

    #[test]
    fn test_typing_clears_error() {
        let mut ctl = field();
        type_char(&mut ctl, &FieldState::default(), "1");
        assert_eq!(ctl.errors().calls, vec![Call::Clear("expiration".to_owned())]);
    }

    #[test]
    fn test_input_reformats_pasted_text() {
        let mut ctl = field();
        let state = FieldState::new("0629", 4);
        let next = ctl.handle(&state, &FieldEvent::Input);
        assert_eq!(next.value, "06 / 29");
        assert_eq!(next.cursor(), 4);
        assert_eq!(ctl.errors().calls, vec![Call::Clear("expiration".to_owned())]);
    }

    #[test]
    fn test_input_truncates_and_clamps_cursor() {
        let mut ctl = field();
        let state = FieldState::new("abc 06/2029 xyz", 15);
        let next = ctl.handle(&state, &FieldEvent::Input);
        assert_eq!(next.value, "06 / 20");
        assert_eq!(next.cursor_start, 7);
        assert_eq!(next.cursor_end, 7);
    }

    #[test]
    fn test_blur_surfaces_errors() {
        let cases = [
            ("", Some(ExpirationError::ExpirationDateRequired)),
            ("1", Some(ExpirationError::ExpirationDateRequired)),
            ("13 / 25", Some(ExpirationError::ExpirationInvalid)),
            ("05 / 24", Some(ExpirationError::ExpirationInvalid)),
            ("06 / 45", Some(ExpirationError::ExpirationInvalid)),
            ("06 / 24", None),
            ("06 / 44", None),
        ];

        for (value, expected) in cases {
            let mut ctl = field();
            let state = FieldState::new(value, 0);
            let next = ctl.handle(&state, &FieldEvent::Blur);
            assert_eq!(next, state);
            assert_eq!(
                ctl.errors().set_calls(),
                expected.into_iter().collect::<Vec<_>>(),
                "value {value:?}"
            );
        }
    }

    #[test]
    fn test_blur_uses_scope() {
        let mut ctl = ExpirationField::new("card-secure", Recorder::default())
            .with_clock(FixedClock(Today::new(2024, 6).unwrap()));
        ctl.handle(&FieldState::default(), &FieldEvent::Blur);
        assert_eq!(
            ctl.errors().calls,
            vec![Call::Set(
                "card-secure".to_owned(),
                ExpirationError::ExpirationDateRequired
            )]
        );
    }

    #[test]
    fn test_blur_respects_policy() {
        let mut ctl = field().with_policy(ValidationPolicy {
            max_years_ahead: 2,
            ..ValidationPolicy::default()
        });
        ctl.handle(&FieldState::new("01 / 30", 0), &FieldEvent::Blur);
        assert_eq!(ctl.errors().set_calls(), vec![ExpirationError::ExpirationInvalid]);
    }

    #[test]
    fn test_validate_does_not_report() {
        let ctl = field();
        let date = ctl.validate(&FieldState::new("06 / 29", 7)).unwrap();
        assert_eq!(date.to_string(), "06/2029");
        assert!(ctl.errors().calls.is_empty());
    }

    #[test]
    fn test_focus_normalizes_cursor() {
        let mut ctl = field();
        for (pos, expected) in [(0, 0), (2, 2), (3, 5), (4, 5), (5, 5), (7, 7)] {
            let state = FieldState::new("12 / 34", pos);
            let next = ctl.handle(&state, &FieldEvent::Focus);
            assert_eq!(next.cursor(), expected, "focus at {pos}");
            assert!(next.is_collapsed());
        }
    }

    #[test]
    fn test_arrow_keys_skip_separator() {
        let mut ctl = field();
        let state = FieldState::new("12 / 34", 2);

        let right = key(&mut ctl, &state, Key::ArrowRight);
        assert_eq!(right.cursor(), 5);

        let left = key(&mut ctl, &right, Key::ArrowLeft);
        assert_eq!(left.cursor(), 2);

        let left = key(&mut ctl, &left, Key::ArrowLeft);
        assert_eq!(left.cursor(), 1);
    }

    #[test]
    fn test_arrow_keys_clamp() {
        let mut ctl = field();
        let start = key(&mut ctl, &FieldState::new("12 / 34", 0), Key::ArrowLeft);
        assert_eq!(start.cursor(), 0);

        let end = key(&mut ctl, &FieldState::new("12 / 34", 7), Key::ArrowRight);
        assert_eq!(end.cursor(), 7);

        let short = key(&mut ctl, &FieldState::new("12", 2), Key::ArrowRight);
        assert_eq!(short.cursor(), 2);
    }

    #[test]
    fn test_arrow_collapses_selection() {
        let mut ctl = field();
        let state = FieldState {
            value:        "12 / 34".to_owned(),
            cursor_start: 0,
            cursor_end:   7,
        };
        let next = key(&mut ctl, &state, Key::ArrowRight);
        assert_eq!(next.cursor_start, 1);
        assert_eq!(next.cursor_end, 1);
    }

    #[test]
    fn test_backspace_twice_from_end() {
        let mut ctl = field();
        let state = FieldState::new("12 / 34", 7);

        let once = key(&mut ctl, &state, Key::Backspace);
        assert_eq!(once.value, "12 / 3");
        assert_eq!(once.cursor(), 6);

        let twice = key(&mut ctl, &once, Key::Backspace);
        assert_eq!(twice.value, "12");
        assert_eq!(twice.cursor(), 2);
        assert_eq!(get_raw(&twice.value).as_str(), "12");
    }

    #[test]
    fn test_backspace_after_separator_removes_month_digit() {
        let mut ctl = field();
        let next = key(&mut ctl, &FieldState::new("12 / 34", 5), Key::Backspace);
        assert_eq!(next.value, "13 / 4");
        assert_eq!(next.cursor(), 1);
    }

    #[test]
    fn test_backspace_at_start_is_noop() {
        let mut ctl = field();
        let state = FieldState::new("12 / 34", 0);
        assert_eq!(key(&mut ctl, &state, Key::Backspace), state);

        let empty = FieldState::default();
        assert_eq!(key(&mut ctl, &empty, Key::Backspace), empty);
        assert!(ctl.errors().calls.is_empty());
    }

    #[test]
    fn test_delete_removes_digit_after_cursor() {
        let mut ctl = field();
        let next = key(&mut ctl, &FieldState::new("12 / 34", 2), Key::Delete);
        assert_eq!(next.value, "12 / 4");
        assert_eq!(next.cursor(), 2);

        let next = key(&mut ctl, &FieldState::new("12 / 34", 0), Key::Delete);
        assert_eq!(next.value, "23 / 4");
        assert_eq!(next.cursor(), 0);

        let next = key(&mut ctl, &FieldState::new("12 / 34", 6), Key::Delete);
        assert_eq!(next.value, "12 / 3");
        assert_eq!(next.cursor(), 6);
    }

    #[test]
    fn test_delete_at_end_is_noop() {
        let mut ctl = field();
        let state = FieldState::new("12 / 34", 7);
        assert_eq!(key(&mut ctl, &state, Key::Delete), state);

        let state = FieldState::new("12", 2);
        assert_eq!(key(&mut ctl, &state, Key::Delete), state);
        assert!(ctl.errors().calls.is_empty());
    }

    #[test]
    fn test_other_keys_pass_through() {
        let mut ctl = field();
        let state = FieldState::new("12 / 3", 6);
        let event = FieldEvent::KeyDown(Key::from("Tab"));
        assert!(!event.prevents_default());
        assert_eq!(ctl.handle(&state, &event), state);
    }

    #[test]
    fn test_key_from_dom_name() {
        assert_eq!(Key::from("ArrowLeft"), Key::ArrowLeft);
        assert_eq!(Key::from("ArrowRight"), Key::ArrowRight);
        assert_eq!(Key::from("Backspace"), Key::Backspace);
        assert_eq!(Key::from("Delete"), Key::Delete);
        assert_eq!(Key::from("Enter"), Key::Other);
    }

    #[test]
    fn test_prevents_default() {
        assert!(FieldEvent::KeyDown(Key::Backspace).prevents_default());
        assert!(FieldEvent::KeyDown(Key::ArrowLeft).prevents_default());
        assert!(!FieldEvent::Input.prevents_default());
        assert!(!FieldEvent::Focus.prevents_default());
        assert!(!FieldEvent::Blur.prevents_default());
    }

    #[test]
    fn test_error_display_by_reference() {
        let mut recorder = Recorder::default();
        {
            let mut ctl = ExpirationField::new("expiration", &mut recorder)
                .with_clock(FixedClock(Today::new(2024, 6).unwrap()));
            ctl.handle(&FieldState::new("1", 1), &FieldEvent::Blur);
        }
        assert_eq!(
            recorder.set_calls(),
            vec![ExpirationError::ExpirationDateRequired]
        );
    }

    #[test]
    fn test_two_fields_are_independent() {
        let mut first = field();
        let mut second = field();
        let a = type_char(&mut first, &FieldState::default(), "1");
        let b = type_char(&mut second, &FieldState::default(), "0");
        assert_eq!(a.value, "1");
        assert_eq!(b.value, "0");
        assert_eq!(first.scope(), second.scope());
        assert_eq!(first.policy(), &ValidationPolicy::default());
    }
}
