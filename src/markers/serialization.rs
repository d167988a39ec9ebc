use serde::de::{Deserialize, Deserializer, SeqAccess, Visitor};
use serde::ser::{Serialize, SerializeSeq, Serializer};

use super::types::MarkerLocations;

/// Serializes as the `display` list of a marker schema, e.g. `["marker-chart", "marker-table"]`.
impl Serialize for MarkerLocations {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(None)?;
        for (location, name) in MarkerLocations::NAMES {
            if self.contains(location) {
                seq.serialize_element(name)?;
            }
        }
        seq.end()
    }
}

/// Unknown location names are skipped, so that schemas from newer profilers still load.
impl<'de> Deserialize<'de> for MarkerLocations {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_seq(LocationsVisitor)
    }
}

struct LocationsVisitor;

impl<'de> Visitor<'de> for LocationsVisitor {
    type Value = MarkerLocations;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str("a list of marker display locations")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut locations = MarkerLocations::empty();
        while let Some(name) = seq.next_element::<String>()? {
            match MarkerLocations::from_location_name(&name) {
                Some(location) => locations |= location,
                None => log::debug!("Ignoring unknown marker display location {name:?}"),
            }
        }
        Ok(locations)
    }
}
