//! Load quotation states from JSON files

use std::error::Error;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use super::QuoteState;

/// Load one quotation state
pub fn load_state(path: &Path) -> Result<QuoteState, Box<dyn Error>> {
    let file = File::open(path)?;
    let state: QuoteState = serde_json::from_reader(BufReader::new(file))?;
    validate(&state)?;
    Ok(state)
}

/// Load a JSON array of quotation states
pub fn load_states(path: &Path) -> Result<Vec<QuoteState>, Box<dyn Error>> {
    let file = File::open(path)?;
    let states: Vec<QuoteState> = serde_json::from_reader(BufReader::new(file))?;
    for (i, state) in states.iter().enumerate() {
        validate(state).map_err(|e| format!("state {}: {}", i, e))?;
    }
    log::info!("Loaded {} quotation states from {}", states.len(), path.display());
    Ok(states)
}

/// Structural checks serde cannot express
fn validate(state: &QuoteState) -> Result<(), Box<dyn Error>> {
    let mains = state.persons.iter().filter(|p| p.is_main).count();
    if mains > 1 {
        return Err(format!("{} persons flagged as main insured", mains).into());
    }
    for (i, person) in state.persons.iter().enumerate() {
        if state.persons[..i].iter().any(|p| p.id == person.id) {
            return Err(format!("duplicate person id '{}'", person.id).into());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_sample_state() {
        let state = load_state(Path::new("data/sample_quote.json")).expect("sample should load");
        assert_eq!(state.main_product.as_deref(), Some("KHOE_TRON_VEN"));
        assert!(state.main_person().is_some());
        assert!(state.waiver.is_some());
    }

    #[test]
    fn test_load_batch() {
        let states = load_states(Path::new("data/sample_batch.json")).expect("batch should load");
        assert_eq!(states.len(), 3);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let state: QuoteState = serde_json::from_str(
            r#"{"persons": [
                {"id": "p1", "gender": "Male", "is_main": true},
                {"id": "p1", "gender": "Female"}
            ]}"#,
        )
        .unwrap();
        assert!(validate(&state).is_err());
    }

    #[test]
    fn test_two_main_insured_rejected() {
        let state: QuoteState = serde_json::from_str(
            r#"{"persons": [
                {"id": "p1", "gender": "Male", "is_main": true},
                {"id": "p2", "gender": "Female", "is_main": true}
            ]}"#,
        )
        .unwrap();
        assert!(validate(&state).is_err());
    }
}
