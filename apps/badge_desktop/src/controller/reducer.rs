//! Registration form state and the transitions that are allowed to change it.

use client_core::RegistrationError;
use shared::{
    domain::{Exhibition, ExhibitionId, FormField, RegistrationForm},
    protocol::RegistrationRequest,
};

use crate::controller::events::Notification;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitRejected {
    InFlight,
    NoExhibitionSelected,
}

#[derive(Debug, Clone)]
pub struct RegistrationState {
    exhibitions: Vec<Exhibition>,
    loading: bool,
    selected: Option<ExhibitionId>,
    form: RegistrationForm,
    result_image: Option<String>,
    refresh: bool,
    busy: bool,
    notification: Option<Notification>,
}

impl Default for RegistrationState {
    fn default() -> Self {
        Self {
            exhibitions: Vec::new(),
            loading: true,
            selected: None,
            form: RegistrationForm::default(),
            result_image: None,
            refresh: false,
            busy: false,
            notification: None,
        }
    }
}

fn non_empty(url: &str) -> Option<String> {
    (!url.trim().is_empty()).then(|| url.to_string())
}

impl RegistrationState {
    pub fn exhibitions_loaded(&mut self, exhibitions: Vec<Exhibition>) {
        self.exhibitions = exhibitions;
        self.loading = false;
    }

    pub fn exhibitions_failed(&mut self, err: &RegistrationError) {
        tracing::warn!("exhibition list unavailable: {err}");
        self.loading = false;
        self.notification = Some(Notification::load_failed());
    }

    /// Returns false when the selection was ignored (still loading or unknown id).
    pub fn select_exhibition(&mut self, id: &ExhibitionId) -> bool {
        if !self.can_select() {
            return false;
        }
        let Some(exhibition) = self.exhibitions.iter().find(|e| &e.id == id) else {
            return false;
        };
        self.result_image = non_empty(&exhibition.card_link);
        self.selected = Some(exhibition.id.clone());
        true
    }

    pub fn edit_field(&mut self, field: FormField, value: impl Into<String>) {
        self.form.set(field, value);
    }

    pub fn begin_submit(&mut self) -> Result<RegistrationRequest, SubmitRejected> {
        if self.busy {
            return Err(SubmitRejected::InFlight);
        }
        let Some(exhibition) = self.selected_exhibition() else {
            self.notification = Some(Notification::submit_failed(
                &RegistrationError::NoExhibitionSelected,
            ));
            return Err(SubmitRejected::NoExhibitionSelected);
        };
        let request = RegistrationRequest::new(self.form.clone(), exhibition);
        self.busy = true;
        Ok(request)
    }

    pub fn submit_succeeded(&mut self, card_url: &str) {
        self.busy = false;
        self.result_image = non_empty(card_url);
        self.refresh = true;
        self.notification = Some(Notification::submit_succeeded());
    }

    pub fn submit_failed(&mut self, err: &RegistrationError) {
        self.busy = false;
        self.notification = Some(Notification::submit_failed(err));
    }

    /// Clears the form and restores the template card for another registration.
    pub fn reset(&mut self) -> bool {
        if !self.refresh {
            return false;
        }
        self.form = RegistrationForm::default();
        self.result_image = self
            .selected_exhibition()
            .and_then(|exhibition| non_empty(&exhibition.card_link));
        self.refresh = false;
        true
    }

    pub fn dismiss_notification(&mut self) {
        self.notification = None;
    }

    pub fn exhibitions(&self) -> &[Exhibition] {
        &self.exhibitions
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn is_refresh(&self) -> bool {
        self.refresh
    }

    pub fn form(&self) -> &RegistrationForm {
        &self.form
    }

    pub fn result_image(&self) -> Option<&str> {
        self.result_image.as_deref()
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    pub fn selected_id(&self) -> Option<&ExhibitionId> {
        self.selected.as_ref()
    }

    pub fn selected_exhibition(&self) -> Option<&Exhibition> {
        let selected = self.selected.as_ref()?;
        self.exhibitions.iter().find(|e| &e.id == selected)
    }

    /// `(id, label)` pairs for the selector; empty while loading.
    pub fn selector_options(&self) -> Vec<(ExhibitionId, &str)> {
        if self.loading {
            return Vec::new();
        }
        self.exhibitions
            .iter()
            .map(|e| (e.id.clone(), e.abbreviation.as_str()))
            .collect()
    }

    pub fn can_select(&self) -> bool {
        !self.loading && !self.exhibitions.is_empty()
    }

    pub fn can_submit(&self) -> bool {
        !self.busy && self.selected_exhibition().is_some()
    }

    pub fn download_target(&self) -> Option<&str> {
        if self.refresh {
            self.result_image()
        } else {
            None
        }
    }
}
