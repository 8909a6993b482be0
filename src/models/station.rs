use crate::error::{ProcessingError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use validator::Validate;

/// The 23 essential stations covered by the annual reports
const ROMANIAN_STATIONS: [(&str, &str); 23] = [
    ("15015", "Ocna Sugatag"),
    ("15020", "Botosani"),
    ("15090", "Iasi"),
    ("15108", "Ceahlau Toaca"),
    ("15120", "Cluj-Napoca"),
    ("15150", "Bacau"),
    ("15170", "Miercurea Ciuc"),
    ("15200", "Arad"),
    ("15230", "Deva"),
    ("15260", "Sibiu"),
    ("15280", "Varfu Omu"),
    ("15292", "Caransebes"),
    ("15310", "Galati"),
    ("15335", "Tulcea"),
    ("15346", "Ramnicu Valcea"),
    ("15350", "Buzau"),
    ("15360", "Sulina"),
    ("15410", "Drobeta Turnu Severin"),
    ("15420", "Bucuresti-Baneasa"),
    ("15450", "Craiova"),
    ("15460", "Calarasi"),
    ("15470", "Rosiorii de Vede"),
    ("15480", "Constanta"),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Station {
    #[validate(length(min = 1))]
    pub id: String,

    #[validate(length(min = 1))]
    pub name: String,
}

impl Station {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Read-only lookup from station id to station, populated once before any query
#[derive(Debug, Clone, Default)]
pub struct StationDirectory {
    stations: HashMap<String, Station>,
}

impl StationDirectory {
    /// Build a directory, rejecting blank fields and duplicate ids
    pub fn new(stations: Vec<Station>) -> Result<Self> {
        let mut map = HashMap::with_capacity(stations.len());

        for station in stations {
            station.validate()?;

            if map.contains_key(&station.id) {
                return Err(ProcessingError::InvalidFormat(format!(
                    "Duplicate station id '{}' in station directory",
                    station.id
                )));
            }
            map.insert(station.id.clone(), station);
        }

        Ok(Self { stations: map })
    }

    /// Built-in directory of the Romanian essential stations
    pub fn romania() -> Self {
        let stations = ROMANIAN_STATIONS
            .iter()
            .map(|(id, name)| (id.to_string(), Station::new(*id, *name)))
            .collect();

        Self { stations }
    }

    pub fn resolve(&self, station_id: &str) -> Result<&Station> {
        self.stations
            .get(station_id)
            .ok_or_else(|| ProcessingError::UnknownStation {
                station_id: station_id.to_string(),
            })
    }

    pub fn name(&self, station_id: &str) -> Result<&str> {
        self.resolve(station_id).map(|station| station.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Station> {
        self.stations.values()
    }
}
