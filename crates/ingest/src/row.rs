//! Row parsing
//!
//! A row is `id,speed,temperature,fuel`. Shape and number parsing are checked
//! here; range checks belong to [`Vehicle::new`].

use fleetwatch_fleet::Vehicle;

use crate::error::{IngestError, Result};

const COLUMNS: [&str; 4] = ["id", "speed", "temperature", "fuel"];

/// Parsed but not yet validated vehicle fields
#[derive(Debug, Clone, PartialEq)]
pub struct RawVehicle {
    pub id: String,
    pub speed: f64,
    pub temperature: f64,
    pub fuel: f64,
}

impl RawVehicle {
    /// Validate into a vehicle. `line` is used for the error.
    pub fn into_vehicle(self, line: usize) -> Result<Vehicle> {
        Vehicle::new(self.id, self.speed, self.temperature, self.fuel)
            .map_err(|source| IngestError::Vehicle { line, source })
    }
}

/// Split one line into a [`RawVehicle`].
pub fn parse_row(line: usize, text: &str, delimiter: char) -> Result<RawVehicle> {
    let fields: Vec<&str> = text.split(delimiter).map(str::trim).collect();
    if fields.len() != COLUMNS.len() {
        return Err(IngestError::ColumnCount {
            line,
            found: fields.len(),
        });
    }

    let number = |index: usize| -> Result<f64> {
        fields[index]
            .parse::<f64>()
            .map_err(|_| IngestError::ParseNumber {
                line,
                column: COLUMNS[index],
                value: fields[index].to_string(),
            })
    };

    Ok(RawVehicle {
        id: fields[0].to_string(),
        speed: number(1)?,
        temperature: number(2)?,
        fuel: number(3)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_row() {
        let raw = parse_row(2, "V1, 80.5,100,50\r", ',').unwrap();
        assert_eq!(
            raw,
            RawVehicle {
                id: "V1".to_string(),
                speed: 80.5,
                temperature: 100.0,
                fuel: 50.0,
            }
        );
    }

    #[test]
    fn test_column_count() {
        assert!(matches!(
            parse_row(3, "V1,80,100", ','),
            Err(IngestError::ColumnCount { line: 3, found: 3 })
        ));
        assert!(matches!(
            parse_row(4, "V1,80,100,50,9", ','),
            Err(IngestError::ColumnCount { line: 4, found: 5 })
        ));
    }

    #[test]
    fn test_parse_number() {
        match parse_row(5, "V1,fast,100,50", ',') {
            Err(IngestError::ParseNumber { line, column, value }) => {
                assert_eq!(line, 5);
                assert_eq!(column, "speed");
                assert_eq!(value, "fast");
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(
            parse_row(6, "V1,80,100,", ','),
            Err(IngestError::ParseNumber { column: "fuel", .. })
        ));
    }

    #[test]
    fn test_custom_delimiter() {
        let raw = parse_row(1, "V9;1;2;3", ';').unwrap();
        assert_eq!(raw.fuel, 3.0);
    }

    #[test]
    fn test_into_vehicle_range_error() {
        let raw = parse_row(7, "V1,80,300,50", ',').unwrap();
        let err = raw.into_vehicle(7).unwrap_err();
        assert_eq!(err.line(), Some(7));
        assert!(matches!(err, IngestError::Vehicle { source, .. } if source.is_validation()));
    }
}
