use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

id_newtype!(ExhibitionId);

/// A bookable event with its schedule, location and template badge image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exhibition {
    #[serde(rename = "_id", alias = "id")]
    pub id: ExhibitionId,
    #[serde(default)]
    pub abbreviation: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub location: String,
    #[serde(default, rename = "cardLink")]
    pub card_link: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Email,
    Company,
    Name,
    Position,
    Address,
    Phone,
    Website,
    Note,
    Pic,
}

impl FormField {
    /// Display order of the registration form.
    pub const ALL: [FormField; 9] = [
        FormField::Email,
        FormField::Company,
        FormField::Name,
        FormField::Position,
        FormField::Address,
        FormField::Phone,
        FormField::Website,
        FormField::Note,
        FormField::Pic,
    ];

    /// Required fields are only prompted for; submission is never blocked on them.
    pub fn is_required(self) -> bool {
        matches!(
            self,
            FormField::Email
                | FormField::Company
                | FormField::Name
                | FormField::Position
                | FormField::Phone
        )
    }

    pub fn label(self) -> &'static str {
        match self {
            FormField::Email => "Email",
            FormField::Company => "Company",
            FormField::Name => "Name",
            FormField::Position => "Position",
            FormField::Address => "Address",
            FormField::Phone => "Phone",
            FormField::Website => "Website",
            FormField::Note => "Note",
            FormField::Pic => "PIC",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            FormField::Email => "Email",
            FormField::Company => "Company name",
            FormField::Name => "Full name",
            FormField::Position => "Job title",
            FormField::Address => "Address",
            FormField::Phone => "Phone number",
            FormField::Website => "Website",
            FormField::Note => "Industry",
            FormField::Pic => "Staff in charge",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationForm {
    pub email: String,
    pub company: String,
    pub name: String,
    pub position: String,
    pub address: String,
    pub phone: String,
    pub website: String,
    pub note: String,
    pub pic: String,
}

impl RegistrationForm {
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Email => &self.email,
            FormField::Company => &self.company,
            FormField::Name => &self.name,
            FormField::Position => &self.position,
            FormField::Address => &self.address,
            FormField::Phone => &self.phone,
            FormField::Website => &self.website,
            FormField::Note => &self.note,
            FormField::Pic => &self.pic,
        }
    }

    pub fn field_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Email => &mut self.email,
            FormField::Company => &mut self.company,
            FormField::Name => &mut self.name,
            FormField::Position => &mut self.position,
            FormField::Address => &mut self.address,
            FormField::Phone => &mut self.phone,
            FormField::Website => &mut self.website,
            FormField::Note => &mut self.note,
            FormField::Pic => &mut self.pic,
        }
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        *self.field_mut(field) = value.into();
    }

    pub fn missing_required(&self) -> Vec<FormField> {
        FormField::ALL
            .into_iter()
            .filter(|field| field.is_required() && self.get(*field).trim().is_empty())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
