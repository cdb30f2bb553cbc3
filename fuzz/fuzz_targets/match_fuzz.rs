#![no_main]
use libfuzzer_sys::fuzz_target;
use seedpeg::testing::ReferenceGrammarKind;
use seedpeg::{MatchConfig, Parser};

fuzz_target!(|data: &[u8]| {
    let Some((&selector, rest)) = data.split_first() else {
        return;
    };
    let Ok(input) = std::str::from_utf8(rest) else {
        return;
    };

    let kind = ReferenceGrammarKind::ALL[usize::from(selector) % ReferenceGrammarKind::ALL.len()];
    let Ok(fixture) = kind.build() else {
        return;
    };
    let config = MatchConfig::default().with_record_history(selector & 0x80 != 0);

    // Ordinary input never produces an engine error.
    let Ok(outcome) = Parser::with_config(&fixture.grammar, config).parse(input, fixture.start) else {
        panic!("engine error on {input:?}");
    };

    assert!(outcome.position <= outcome.input_len);
    if outcome.is_success() {
        assert_eq!(outcome.result.span(), 0..outcome.position);
        let prefix: String = input.chars().take(outcome.position).collect();
        assert_eq!(outcome.result.text(), prefix);
    } else {
        assert_eq!(outcome.position, 0);
    }
});
