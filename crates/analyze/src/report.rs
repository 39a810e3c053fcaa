//! MeasureReport -- every developmental measure of one file, for one
//! participant, in a single serializable record.

use childes_core::Utterance;
use indexmap::IndexMap;
use serde::Serialize;

use crate::ipsyn;
use crate::lexical::{ttr, word_frequencies};
use crate::mlu::{mlum, mluw};

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MeasureReport {
    pub file_path: String,
    pub participant: String,
    /// Utterances of the participant, before any measure-specific skipping.
    pub utterances: usize,
    pub mlum: f64,
    pub mluw: f64,
    pub ttr: f64,
    pub ipsyn: u32,
    /// Points per IPSyn item, N1 through S19.
    pub ipsyn_items: IndexMap<String, u8>,
}

impl MeasureReport {
    /// Measure the utterances of `participant` in one file.
    ///
    /// Utterances of other speakers are ignored. TTR keeps case.
    pub fn new(
        file_path: &str,
        participant: &str,
        utterances: &[Utterance],
        exclude_switch: bool,
    ) -> Self {
        let own: Vec<&Utterance> = utterances
            .iter()
            .filter(|u| u.participant == participant)
            .collect();
        let board = ipsyn::score(own.iter().copied());
        let frequencies = word_frequencies(own.iter().map(|u| u.words()), true);

        MeasureReport {
            file_path: file_path.to_string(),
            participant: participant.to_string(),
            utterances: own.len(),
            mlum: mlum(own.iter().copied(), exclude_switch),
            mluw: mluw(own.iter().copied(), exclude_switch),
            ttr: ttr(&frequencies),
            ipsyn: board.total(),
            ipsyn_items: board.to_map(),
        }
    }
}
