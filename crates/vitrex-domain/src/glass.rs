//! Glass catalogue and the branch-specific damage details.
//!
//! Each glass type owns its own details shape. On the wire every closed choice
//! is an object `{ "type": <id>, "label": <French label> }`; labels are always
//! recomputed from the id and ignored on input.

use serde::de::{DeserializeOwned, Deserializer};
use serde::ser::{SerializeStruct, Serializer};
use serde::{Deserialize, Serialize};

use crate::validation::{FieldErrors, ValidationError, has_min_len};

/// A closed choice with a fixed display label.
pub trait Labelled: Copy {
    fn label(self) -> &'static str;
}

/// The five mutually exclusive glass categories of step 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GlassType {
    Windshield,
    LeftSide,
    RightSide,
    Rear,
    Other,
}

impl GlassType {
    pub const ALL: [GlassType; 5] = [
        Self::Windshield,
        Self::LeftSide,
        Self::RightSide,
        Self::Rear,
        Self::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Windshield => "windshield",
            Self::LeftSide => "leftSide",
            Self::RightSide => "rightSide",
            Self::Rear => "rear",
            Self::Other => "other",
        }
    }

    /// Side windows need a fourth step (glass subtype).
    pub fn is_side_window(self) -> bool {
        matches!(self, Self::LeftSide | Self::RightSide)
    }
}

impl Labelled for GlassType {
    fn label(self) -> &'static str {
        match self {
            Self::Windshield => "Pare-brise",
            Self::LeftSide => "Vitre latérale gauche",
            Self::RightSide => "Vitre latérale droite",
            Self::Rear => "Lunette arrière",
            Self::Other => "Autre vitrage",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WindshieldDamage {
    SingleCrack,
    SingleImpact,
    TwoToThreeImpacts,
    FourPlusImpacts,
}

impl Labelled for WindshieldDamage {
    fn label(self) -> &'static str {
        match self {
            Self::SingleCrack => "Une fissure",
            Self::SingleImpact => "Un impact",
            Self::TwoToThreeImpacts => "2 à 3 impacts",
            Self::FourPlusImpacts => "4 impacts ou plus",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WindowPosition {
    Front,
    Rear,
}

impl Labelled for WindowPosition {
    fn label(self) -> &'static str {
        match self {
            Self::Front => "Vitres avant",
            Self::Rear => "Vitres arrière",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SideGlass {
    SlidingDoor,
    FixedDoor,
    FixedBody,
}

impl Labelled for SideGlass {
    fn label(self) -> &'static str {
        match self {
            Self::SlidingDoor => "Vitre coulissante de la portière",
            Self::FixedDoor => "Vitre fixe sur la portière",
            Self::FixedBody => "Vitre fixe de carrosserie",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RearZone {
    Complete,
    LeftSide,
    RightSide,
}

impl Labelled for RearZone {
    fn label(self) -> &'static str {
        match self {
            Self::Complete => "Lunette complète",
            Self::LeftSide => "Côté gauche",
            Self::RightSide => "Côté droit",
        }
    }
}

/// Wire wrapper rendering a choice as `{ "type", "label" }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Choice<T>(pub T);

impl<T> Choice<T> {
    pub fn get(self) -> T {
        self.0
    }
}

impl<T: Labelled> Choice<T> {
    pub fn label(self) -> &'static str {
        self.0.label()
    }
}

impl<T: Labelled + Serialize> Serialize for Choice<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Choice", 2)?;
        s.serialize_field("type", &self.0)?;
        s.serialize_field("label", self.0.label())?;
        s.end()
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ChoiceRepr<T> {
    #[serde(rename = "type")]
    kind: T,
    #[serde(default, rename = "label")]
    _label: Option<String>,
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Choice<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        ChoiceRepr::<T>::deserialize(deserializer).map(|repr| Choice(repr.kind))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct WindshieldDetails {
    pub type_dommage: Choice<WindshieldDamage>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SideWindowDetails {
    pub position_vitre: Choice<WindowPosition>,
    pub type_vitre: Choice<SideGlass>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RearWindowDetails {
    pub zone_lunette: Choice<RearZone>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct OtherGlassDetails {
    pub description: String,
}

/// The damage described by the intake, keyed by glass type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GlassDamage {
    Windshield(WindshieldDetails),
    LeftSide(SideWindowDetails),
    RightSide(SideWindowDetails),
    Rear(RearWindowDetails),
    Other(OtherGlassDetails),
}

impl GlassDamage {
    pub fn glass_type(&self) -> GlassType {
        match self {
            Self::Windshield(_) => GlassType::Windshield,
            Self::LeftSide(_) => GlassType::LeftSide,
            Self::RightSide(_) => GlassType::RightSide,
            Self::Rear(_) => GlassType::Rear,
            Self::Other(_) => GlassType::Other,
        }
    }

    /// Details object for this branch, with no fields from other branches.
    pub fn details_json(&self) -> serde_json::Value {
        let value = match self {
            Self::Windshield(d) => serde_json::to_value(d),
            Self::LeftSide(d) | Self::RightSide(d) => serde_json::to_value(d),
            Self::Rear(d) => serde_json::to_value(d),
            Self::Other(d) => serde_json::to_value(d),
        };
        // Plain structs of strings cannot fail to serialize.
        value.unwrap_or(serde_json::Value::Null)
    }

    /// Parse a details object according to the glass type it belongs to.
    pub fn from_details(
        glass_type: GlassType,
        details: serde_json::Value,
    ) -> Result<Self, serde_json::Error> {
        fn parse<T: DeserializeOwned>(v: serde_json::Value) -> Result<T, serde_json::Error> {
            serde_json::from_value(v)
        }
        Ok(match glass_type {
            GlassType::Windshield => Self::Windshield(parse(details)?),
            GlassType::LeftSide => Self::LeftSide(parse(details)?),
            GlassType::RightSide => Self::RightSide(parse(details)?),
            GlassType::Rear => Self::Rear(parse(details)?),
            GlassType::Other => Self::Other(parse(details)?),
        })
    }

    /// `(caption, value)` lines describing the damage, for notifications.
    pub fn summary_lines(&self) -> Vec<(&'static str, String)> {
        match self {
            Self::Windshield(d) => vec![("Type de dommage", d.type_dommage.label().to_owned())],
            Self::LeftSide(d) | Self::RightSide(d) => vec![
                ("Position de la vitre", d.position_vitre.label().to_owned()),
                ("Type de vitre", d.type_vitre.label().to_owned()),
            ],
            Self::Rear(d) => vec![("Zone de la lunette", d.zone_lunette.label().to_owned())],
            Self::Other(d) => vec![("Description", d.description.trim().to_owned())],
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut errors = FieldErrors::new();
        if let Self::Other(d) = self {
            errors.check(
                "description",
                has_min_len(&d.description, 1),
                "Décrivez le vitrage endommagé",
            );
        }
        errors.into_result()
    }
}
