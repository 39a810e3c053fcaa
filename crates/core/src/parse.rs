//! The full parsing pipeline for one CHAT file.

use crate::align::align;
use crate::error::ParseError;
use crate::header::{add_undeclared_speakers, parse_header};
use crate::lines::reconstruct_lines;
use crate::model::ChatFile;
use crate::tiers::group_tiers;

/// Parse the text of one CHAT file.
///
/// `file_path` is recorded on the result and used in error messages; it
/// is not read from.
pub fn parse_chat(text: &str, file_path: &str) -> Result<ChatFile, ParseError> {
    let lines = reconstruct_lines(text, file_path)?;
    let mut header = parse_header(&lines);

    let utterances = group_tiers(&lines)
        .iter()
        .filter_map(|tiers| align(tiers, file_path).transpose())
        .collect::<Result<Vec<_>, _>>()?;

    add_undeclared_speakers(
        &mut header,
        utterances.iter().map(|u| u.participant.as_str()),
    );

    tracing::debug!(
        file = file_path,
        lines = lines.len(),
        utterances = utterances.len(),
        "parsed CHAT file"
    );

    Ok(ChatFile {
        file_path: file_path.to_string(),
        header,
        utterances,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::POSTCLITIC;

    const EVE: &str = "@UTF8
@PID:\t11312/c-00034743-1
@Begin
@Languages:\teng
@Participants:\tCHI Eve Target_Child , MOT Sue Mother
@ID:\teng|Brown|CHI|1;06.00|female|||Target_Child|||
@ID:\teng|Brown|MOT||female|||Mother|||
@Date:\t15-OCT-1962
*CHI:\tmore cookie . [+ IMP]
%mor:\tqn|more n|cookie .
%gra:\t1|2|QUANT 2|0|INCROOT 3|2|PUNCT
%int:\tdistinctive , loud
*MOT:\tyou 0v more cookies ?
%mor:\tpro|you 0v|v qn|more n|cookie-PL ?
%gra:\t1|2|SUBJ 2|0|ROOT 3|4|QUANT 4|2|OBJ 5|2|PUNCT
*CHI:\tit's
\tmine .
%mor:\tpro|it~cop|be&3S pro:poss|mine .
%gra:\t1|2|SUBJ 2|0|ROOT 3|2|PRED 4|2|PUNCT
@End
";

    #[test]
    fn parses_header_and_utterances() {
        let file = parse_chat(EVE, "eve.cha").unwrap();
        assert_eq!(file.file_path, "eve.cha");
        assert_eq!(file.header.languages, vec!["eng"]);
        assert_eq!(file.header.get("PID"), Some("11312/c-00034743-1"));
        assert_eq!(file.utterances.len(), 3);
        assert_eq!(file.utterances[0].tiers["%int"], "distinctive , loud");
        assert_eq!(file.utterances[2].tokens[1].word, POSTCLITIC);
        assert_eq!(
            file.utterances[2].words().collect::<Vec<_>>(),
            vec!["it's", "mine", "."]
        );
    }

    #[test]
    fn undeclared_speakers_get_blank_records() {
        let file = parse_chat("@Participants:\tCHI Eve Target_Child\n*INV:\thi .", "t").unwrap();
        assert_eq!(
            file.header.participants.keys().collect::<Vec<_>>(),
            vec!["CHI", "INV"]
        );
        assert!(file.header.participants["INV"].is_blank());
    }

    #[test]
    fn alignment_error_aborts_file() {
        let err = parse_chat("*CHI:\ta b\n%mor:\tn|a\n", "bad.cha").unwrap_err();
        assert_eq!(err.file(), "bad.cha");
    }

    #[test]
    fn empty_text_is_an_empty_file() {
        let file = parse_chat("", "t").unwrap();
        assert!(file.header.is_empty());
        assert!(file.utterances.is_empty());
    }
}
