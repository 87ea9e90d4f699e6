//! Multi-step car-damage intake form.
//!
//! The form is a pure state machine: [`transition`] takes the current
//! [`IntakeForm`] and an [`Event`] and returns the next form. All field values
//! live in one [`IntakeRecord`] shared by every step, so navigating back and
//! forth never clears anything. Which damage fields end up in the payload
//! depends only on the glass type selected when submitting.
//!
//! ```text
//! Contact ──next──▶ GlassSelection ──next──▶ DamageDetail ──next──▶ SideWindowSubtype
//!                                             │ windshield / rear / other: submit
//!                                             └ left / right side: position, then next
//! ```

use std::collections::BTreeSet;

use crate::contact::{ContactDetails, ContactField, ContactInput, Insurer, validate_contact_fields};
use crate::glass::{
    Choice, GlassDamage, GlassType, OtherGlassDetails, RearWindowDetails, RearZone, SideGlass,
    SideWindowDetails, WindowPosition, WindshieldDamage, WindshieldDetails,
};
use crate::payload::IntakePayload;
use crate::referral::AttributionContext;
use crate::validation::{FieldErrors, ValidationError, format_plate};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Step {
    /// Identity & vehicle.
    #[default]
    Contact,
    GlassSelection,
    DamageDetail,
    /// Only reached for left/right side windows.
    SideWindowSubtype,
}

impl Step {
    /// 1-based position shown in the progress indicator.
    pub fn number(self) -> u8 {
        match self {
            Self::Contact => 1,
            Self::GlassSelection => 2,
            Self::DamageDetail => 3,
            Self::SideWindowSubtype => 4,
        }
    }
}

/// Every value entered so far, across all steps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntakeRecord {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub license_plate: String,
    pub insurer: Option<Insurer>,
    pub insurer_other: String,
    pub address: String,
    pub postal_code: String,
    pub city: String,
    pub glass_type: Option<GlassType>,
    pub windshield_damage: Option<WindshieldDamage>,
    pub window_position: Option<WindowPosition>,
    pub side_glass: Option<SideGlass>,
    pub rear_zone: Option<RearZone>,
    pub other_description: String,
}

impl IntakeRecord {
    fn contact_input(&self) -> ContactInput<'_> {
        ContactInput {
            first_name: &self.first_name,
            last_name: &self.last_name,
            email: &self.email,
            phone: &self.phone,
            license_plate: &self.license_plate,
            insurer: self.insurer,
            insurer_other: &self.insurer_other,
            address: &self.address,
            postal_code: &self.postal_code,
            city: &self.city,
        }
    }

    pub fn contact_errors(&self) -> FieldErrors {
        validate_contact_fields(self.contact_input())
    }

    fn set_contact_field(&mut self, field: ContactField, value: String) {
        match field {
            ContactField::FirstName => self.first_name = value,
            ContactField::LastName => self.last_name = value,
            ContactField::Email => self.email = value,
            ContactField::Phone => self.phone = value,
            ContactField::LicensePlate => self.license_plate = format_plate(&value),
            ContactField::Insurer => self.insurer = value.parse().ok(),
            ContactField::InsurerOther => self.insurer_other = value,
            ContactField::Address => self.address = value,
            ContactField::PostalCode => self.postal_code = value,
            ContactField::City => self.city = value,
        }
    }

    fn contact_details(&self) -> Option<ContactDetails> {
        let insurer = self.insurer?;
        Some(ContactDetails {
            first_name: self.first_name.trim().to_owned(),
            last_name: self.last_name.trim().to_owned(),
            email: self.email.trim().to_owned(),
            phone: self.phone.trim().to_owned(),
            license_plate: self.license_plate.clone(),
            insurer,
            insurer_other: (insurer == Insurer::Other)
                .then(|| self.insurer_other.trim().to_owned()),
            address: self.address.trim().to_owned(),
            postal_code: self.postal_code.trim().to_owned(),
            city: self.city.trim().to_owned(),
        })
    }

    /// Damage for the currently selected branch, if that branch is complete.
    /// Values entered on other branches are ignored.
    pub fn damage(&self) -> Option<GlassDamage> {
        let side = || {
            Some(SideWindowDetails {
                position_vitre: Choice(self.window_position?),
                type_vitre: Choice(self.side_glass?),
            })
        };
        match self.glass_type? {
            GlassType::Windshield => Some(GlassDamage::Windshield(WindshieldDetails {
                type_dommage: Choice(self.windshield_damage?),
            })),
            GlassType::LeftSide => side().map(GlassDamage::LeftSide),
            GlassType::RightSide => side().map(GlassDamage::RightSide),
            GlassType::Rear => Some(GlassDamage::Rear(RearWindowDetails {
                zone_lunette: Choice(self.rear_zone?),
            })),
            GlassType::Other => {
                let description = self.other_description.trim();
                (!description.is_empty()).then(|| {
                    GlassDamage::Other(OtherGlassDetails {
                        description: description.to_owned(),
                    })
                })
            }
        }
    }
}

/// User interactions with the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Text typed into (or option picked in) a step-1 field. The insurer is
    /// given by its wire name, as sent by the select.
    Edit(ContactField, String),
    SelectGlass(GlassType),
    SelectWindshieldDamage(WindshieldDamage),
    SelectWindowPosition(WindowPosition),
    SelectSideGlass(SideGlass),
    SelectRearZone(RearZone),
    DescribeOther(String),
    Next,
    Back,
    Cancel,
}

/// Current step, accumulated values and the field errors on display.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntakeForm {
    step: Step,
    record: IntakeRecord,
    touched: BTreeSet<ContactField>,
    errors: FieldErrors,
}

impl IntakeForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn record(&self) -> &IntakeRecord {
        &self.record
    }

    /// Errors for fields the user has touched (or all fields after a
    /// rejected "next").
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn apply(self, event: Event) -> Self {
        transition(self, event)
    }

    /// Whether "next" would advance from the current step.
    pub fn can_advance(&self) -> bool {
        match self.step {
            Step::Contact => self.record.contact_errors().is_empty(),
            Step::GlassSelection => self.record.glass_type.is_some(),
            Step::DamageDetail => {
                self.record.glass_type.is_some_and(GlassType::is_side_window)
                    && self.record.window_position.is_some()
            }
            Step::SideWindowSubtype => false,
        }
    }

    /// Whether the current step is terminal and complete.
    pub fn can_submit(&self) -> bool {
        let Some(glass) = self.record.glass_type else {
            return false;
        };
        let terminal = match self.step {
            Step::DamageDetail => !glass.is_side_window(),
            Step::SideWindowSubtype => glass.is_side_window(),
            Step::Contact | Step::GlassSelection => false,
        };
        terminal && self.record.contact_errors().is_empty() && self.record.damage().is_some()
    }

    /// Assemble the normalized payload, attaching the visitor's attribution.
    pub fn submit(&self, attribution: &AttributionContext) -> Result<IntakePayload, ValidationError> {
        let mut errors = self.record.contact_errors();
        let damage = self.record.damage();
        if damage.is_none() {
            errors.insert("details", "Complétez la description du dommage");
        }
        if !self.can_submit() && errors.is_empty() {
            errors.insert("step", "Le formulaire n'est pas terminé");
        }
        errors.clone().into_result()?;
        match (self.record.contact_details(), damage) {
            (Some(contact), Some(damage)) => Ok(IntakePayload {
                contact,
                damage,
                referral_code: attribution.raw_code().map(str::to_owned),
            }),
            _ => Err(ValidationError { fields: errors }),
        }
    }

    fn refresh_errors(&mut self) {
        let mut errors = self.record.contact_errors();
        errors.retain(|name| self.touched.iter().any(|f| f.as_str() == name));
        self.errors = errors;
    }
}

/// Pure transition function of the intake form.
///
/// Events that do not belong to the current step leave the form unchanged.
pub fn transition(mut form: IntakeForm, event: Event) -> IntakeForm {
    match (form.step, event) {
        (_, Event::Cancel) => return IntakeForm::default(),

        (Step::Contact, Event::Edit(field, value)) => {
            form.record.set_contact_field(field, value);
            form.touched.insert(field);
            form.refresh_errors();
        }
        (Step::Contact, Event::Next) => {
            if form.can_advance() {
                form.errors = FieldErrors::new();
                form.step = Step::GlassSelection;
            } else {
                form.touched.extend(ContactField::ALL);
                form.refresh_errors();
            }
        }

        (Step::GlassSelection, Event::SelectGlass(glass)) => form.record.glass_type = Some(glass),
        (Step::GlassSelection, Event::Next) if form.can_advance() => {
            form.step = Step::DamageDetail;
        }
        (Step::GlassSelection, Event::Back) => form.step = Step::Contact,

        (Step::DamageDetail, event) => {
            let glass = form.record.glass_type;
            match (glass, event) {
                (Some(GlassType::Windshield), Event::SelectWindshieldDamage(d)) => {
                    form.record.windshield_damage = Some(d);
                }
                (Some(g), Event::SelectWindowPosition(p)) if g.is_side_window() => {
                    form.record.window_position = Some(p);
                }
                (Some(GlassType::Rear), Event::SelectRearZone(z)) => form.record.rear_zone = Some(z),
                (Some(GlassType::Other), Event::DescribeOther(text)) => {
                    form.record.other_description = text;
                }
                (_, Event::Next) if form.can_advance() => form.step = Step::SideWindowSubtype,
                (_, Event::Back) => form.step = Step::GlassSelection,
                _ => {}
            }
        }

        (Step::SideWindowSubtype, Event::SelectSideGlass(g)) => form.record.side_glass = Some(g),
        (Step::SideWindowSubtype, Event::Back) => form.step = Step::DamageDetail,

        _ => {}
    }
    form
}
