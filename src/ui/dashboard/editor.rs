use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::task::Task;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Login,
    Register,
    NewTask,
    EditTask,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldId {
    Name,
    Email,
    Password,
    Title,
    Description,
}

#[derive(Debug, Clone)]
pub struct FormField {
    pub id: FieldId,
    pub label: &'static str,
    pub value: String,
    pub required: bool,
    pub masked: bool,
}

impl FormField {
    fn new(id: FieldId, label: &'static str, required: bool) -> Self {
        Self {
            id,
            label,
            value: String::new(),
            required,
            masked: false,
        }
    }

    fn masked(mut self) -> Self {
        self.masked = true;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    None,
    Cancel,
    Submit,
}

/// A small focus-driven form, used for the auth screens and the task
/// create/edit modals.
#[derive(Debug, Clone)]
pub struct FormState {
    kind: FormKind,
    fields: Vec<FormField>,
    active: usize,
    error: Option<String>,
    task_id: Option<String>,
}

impl FormState {
    pub fn login() -> Self {
        Self {
            kind: FormKind::Login,
            fields: vec![
                FormField::new(FieldId::Email, "Email", true),
                FormField::new(FieldId::Password, "Password", true).masked(),
            ],
            active: 0,
            error: None,
            task_id: None,
        }
    }

    pub fn register() -> Self {
        Self {
            kind: FormKind::Register,
            fields: vec![
                FormField::new(FieldId::Name, "Full Name", true),
                FormField::new(FieldId::Email, "Email", true),
                FormField::new(FieldId::Password, "Password", true).masked(),
            ],
            active: 0,
            error: None,
            task_id: None,
        }
    }

    pub fn new_task() -> Self {
        Self {
            kind: FormKind::NewTask,
            fields: vec![
                FormField::new(FieldId::Title, "Title", true),
                FormField::new(FieldId::Description, "Description", false),
            ],
            active: 0,
            error: None,
            task_id: None,
        }
    }

    pub fn edit_task(task: &Task) -> Self {
        let mut form = Self::new_task();
        form.kind = FormKind::EditTask;
        form.task_id = Some(task.id.clone());
        for field in &mut form.fields {
            match field.id {
                FieldId::Title => field.value = task.title.clone(),
                FieldId::Description => {
                    field.value = task.description.clone().unwrap_or_default()
                }
                _ => {}
            }
        }
        form
    }

    pub fn kind(&self) -> FormKind {
        self.kind
    }

    pub fn task_id(&self) -> Option<&str> {
        self.task_id.as_deref()
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_error(&mut self, message: String) {
        self.error = Some(message);
    }

    pub fn value(&self, id: FieldId) -> &str {
        self.fields
            .iter()
            .find(|field| field.id == id)
            .map(|field| field.value.as_str())
            .unwrap_or("")
    }

    /// Clear a field, e.g. the password after a failed login or a
    /// successful registration.
    pub fn clear_field(&mut self, id: FieldId) {
        if let Some(field) = self.fields.iter_mut().find(|field| field.id == id) {
            field.value.clear();
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> FormAction {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('u') {
            if let Some(field) = self.current_field_mut() {
                field.value.clear();
            }
            self.error = None;
            return FormAction::None;
        }

        match key.code {
            KeyCode::Esc => return FormAction::Cancel,
            KeyCode::Tab | KeyCode::Down => {
                self.move_active(1);
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.move_active(-1);
            }
            KeyCode::Enter => {
                if self.active + 1 >= self.fields.len() {
                    return FormAction::Submit;
                }
                self.move_active(1);
            }
            KeyCode::Backspace => {
                if let Some(field) = self.current_field_mut() {
                    field.value.pop();
                }
            }
            KeyCode::Char(ch) => {
                if key.modifiers.contains(KeyModifiers::CONTROL) {
                    return FormAction::None;
                }
                if !ch.is_control() {
                    if let Some(field) = self.current_field_mut() {
                        field.value.push(ch);
                    }
                }
            }
            _ => {}
        }

        self.error = None;
        FormAction::None
    }

    fn move_active(&mut self, delta: isize) {
        let len = self.fields.len() as isize;
        if len == 0 {
            self.active = 0;
            return;
        }
        let next = (self.active as isize + delta).rem_euclid(len);
        self.active = next as usize;
    }

    fn current_field_mut(&mut self) -> Option<&mut FormField> {
        self.fields.get_mut(self.active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(form: &mut FormState, text: &str) {
        for ch in text.chars() {
            form.handle_key(key(KeyCode::Char(ch)));
        }
    }

    #[test]
    fn enter_advances_then_submits_on_last_field() {
        let mut form = FormState::login();
        type_text(&mut form, "a@x.com");
        assert_eq!(form.handle_key(key(KeyCode::Enter)), FormAction::None);
        type_text(&mut form, "secret1");
        assert_eq!(form.handle_key(key(KeyCode::Enter)), FormAction::Submit);
        assert_eq!(form.value(FieldId::Email), "a@x.com");
        assert_eq!(form.value(FieldId::Password), "secret1");
    }

    #[test]
    fn esc_cancels() {
        let mut form = FormState::new_task();
        assert_eq!(form.handle_key(key(KeyCode::Esc)), FormAction::Cancel);
    }

    #[test]
    fn tab_wraps_focus() {
        let mut form = FormState::register();
        assert_eq!(form.active_index(), 0);
        form.handle_key(key(KeyCode::Tab));
        form.handle_key(key(KeyCode::Tab));
        form.handle_key(key(KeyCode::Tab));
        assert_eq!(form.active_index(), 0);
    }

    #[test]
    fn edit_task_seeds_fields() {
        let task = Task {
            id: "1".to_string(),
            title: "Buy milk".to_string(),
            description: Some("2 liters".to_string()),
            status: crate::task::TaskStatus::Pending,
            created_at: None,
        };
        let form = FormState::edit_task(&task);
        assert_eq!(form.kind(), FormKind::EditTask);
        assert_eq!(form.task_id(), Some("1"));
        assert_eq!(form.value(FieldId::Title), "Buy milk");
        assert_eq!(form.value(FieldId::Description), "2 liters");
    }

    #[test]
    fn typing_clears_previous_error() {
        let mut form = FormState::login();
        form.set_error("Invalid email or password".to_string());
        form.handle_key(key(KeyCode::Char('a')));
        assert!(form.error().is_none());
    }
}
