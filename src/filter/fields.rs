use super::error::FilterError;
use super::operator::UiOperator;
use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

pub const FAVORITE: &str = "favorite";
pub const FIRMWARE: &str = "firmware";
pub const THING_NAME: &str = "thingName";

/// Prefix of the firmware fields stored in the `$package` named shadow
pub const PACKAGE_SHADOW_PREFIX: &str = "shadow.name.$package.reported.";

pub const TEXT_FIELDS: [&str; 7] = [
    THING_NAME,
    "thingTypeName",
    "connectivity.disconnectReason",
    "attributes.brandName",
    "attributes.country",
    "attributes.modelName",
    "thingGroupNames",
];

pub const BOOLEAN_FIELDS: [&str; 2] = ["connectivity.connected", "attributes.hasApplianceFW"];

pub const TIMESTAMP_FIELDS: [&str; 3] = [
    "connectivity.timestamp",
    "attributes.provisioningTimestamp",
    "attributes.productionTimestamp",
];

const EQ_ONLY: &[UiOperator] = &[UiOperator::Eq];
const EQ_NE: &[UiOperator] = &[UiOperator::Eq, UiOperator::Ne];
const RANGE: &[UiOperator] = &[UiOperator::Lt, UiOperator::Le, UiOperator::Gt, UiOperator::Ge];
const EQ_OR_RANGE: &[UiOperator] = &[
    UiOperator::Eq,
    UiOperator::Lt,
    UiOperator::Le,
    UiOperator::Gt,
    UiOperator::Ge,
];
const FREE_TEXT: &[UiOperator] = &[UiOperator::Match];

static FIRMWARE_PATH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^shadow\.name\.\$package\.reported\.([^.]+)\.(version|attributes\.versionInt)$")
        .expect("valid firmware path regex")
});

/// One entry of the closed set of filterable device fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field {
    /// Pseudo-field restricting results to the user's favorite devices
    Favorite,
    /// Synthetic UI field routed onto one of the two firmware shadow paths
    Firmware,
    /// Token entered without a property (searches every indexed field)
    FreeText,
    Text(&'static str),
    Boolean(&'static str),
    Timestamp(&'static str),
    /// Raw firmware version string of one firmware type
    FirmwareVersion(String),
    /// Packed integer firmware version of one firmware type
    FirmwareVersionInt(String),
}

impl Field {
    pub fn parse(path: &str) -> Result<Self, FilterError> {
        if path.is_empty() {
            return Ok(Field::FreeText);
        }
        if path == FAVORITE {
            return Ok(Field::Favorite);
        }
        if path == FIRMWARE {
            return Ok(Field::Firmware);
        }
        if let Some(name) = TEXT_FIELDS.iter().find(|f| **f == path) {
            return Ok(Field::Text(*name));
        }
        if let Some(name) = BOOLEAN_FIELDS.iter().find(|f| **f == path) {
            return Ok(Field::Boolean(*name));
        }
        if let Some(name) = TIMESTAMP_FIELDS.iter().find(|f| **f == path) {
            return Ok(Field::Timestamp(*name));
        }
        if let Some(caps) = FIRMWARE_PATH_RE.captures(path) {
            let firmware_type = caps[1].to_string();
            return Ok(if &caps[2] == "version" {
                Field::FirmwareVersion(firmware_type)
            } else {
                Field::FirmwareVersionInt(firmware_type)
            });
        }
        Err(FilterError::UnknownField(path.to_string()))
    }

    pub fn path(&self) -> Cow<'static, str> {
        match self {
            Field::Favorite => Cow::Borrowed(FAVORITE),
            Field::Firmware => Cow::Borrowed(FIRMWARE),
            Field::FreeText => Cow::Borrowed(""),
            Field::Text(name) | Field::Boolean(name) | Field::Timestamp(name) => {
                Cow::Borrowed(*name)
            }
            Field::FirmwareVersion(firmware_type) => {
                Cow::Owned(firmware_version_path(firmware_type))
            }
            Field::FirmwareVersionInt(firmware_type) => {
                Cow::Owned(firmware_version_int_path(firmware_type))
            }
        }
    }

    /// UI operators the filter builder offers for this field
    pub fn allowed_operators(&self) -> &'static [UiOperator] {
        match self {
            Field::Favorite | Field::Boolean(_) | Field::FirmwareVersion(_) => EQ_ONLY,
            Field::Text(_) => EQ_NE,
            Field::Timestamp(_) | Field::FirmwareVersionInt(_) => RANGE,
            Field::Firmware => EQ_OR_RANGE,
            Field::FreeText => FREE_TEXT,
        }
    }

    pub fn supports(&self, operator: UiOperator) -> bool {
        self.allowed_operators().contains(&operator)
    }
}

pub fn firmware_version_path(firmware_type: &str) -> String {
    format!("{PACKAGE_SHADOW_PREFIX}{firmware_type}.version")
}

pub fn firmware_version_int_path(firmware_type: &str) -> String {
    format!("{PACKAGE_SHADOW_PREFIX}{firmware_type}.attributes.versionInt")
}
