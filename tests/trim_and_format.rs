use sundry::format::{format, FormatArgs};
use sundry::trim::{trim, trim_end, trim_start, DEFAULT_TRIM_CHARS};
use sundry::{Occurrences, PatternTrimmer, TemplateFormatter};

#[test]
fn documented_trim_examples() {
    assert_eq!(trim("#!#!Hey!#!#!", Some("#!")), "Hey");
    assert_eq!(trim_start("#!#!Hey!#!#!", Some("#!")), "Hey!#!#!");
    assert_eq!(trim_end("#!#!Hey!#!#!", Some("#!")), "#!#!Hey");
}

#[test]
fn trim_of_empty_is_empty_for_any_charset() {
    for chars in [None, Some(""), Some("#!"), Some("a-z^$"), Some("]")] {
        assert_eq!(trim("", chars), "");
    }
}

#[test]
fn metacharacter_charset_is_literal() {
    let chars = Some("a-z^$");
    assert_eq!(trim("$^a-zbz-a^$", chars), "b");
    assert_eq!(trim("mid", chars), "mid");
    assert_eq!(trim("qaq", chars), "qaq");
}

#[test]
fn charset_order_and_duplicates_do_not_matter() {
    let input = "!!##value##!!";
    assert_eq!(trim(input, Some("#!")), trim(input, Some("!#")));
    assert_eq!(trim(input, Some("#!")), trim(input, Some("##!!#")));
}

#[test]
fn trimmer_matches_free_functions() {
    let trimmer = PatternTrimmer::new(None).unwrap();
    let input = "\u{FEFF} padded \r\n";
    assert_eq!(trimmer.charset(), DEFAULT_TRIM_CHARS);
    assert_eq!(trimmer.trim(input), trim(input, None));
    assert_eq!(trimmer.trim_start(input), trim_start(input, None));
    assert_eq!(trimmer.trim_end(input), trim_end(input, None));
}

#[test]
fn documented_format_examples() {
    assert_eq!(
        format("Hello {1} {0}!", &FormatArgs::positional(["Doe", "John"])),
        "Hello John Doe!"
    );
    assert_eq!(
        format(
            "Hello {first} {last}!",
            &FormatArgs::named([("first", "John"), ("last", "Doe")])
        ),
        "Hello John Doe!"
    );
    assert_eq!(format("No args", &FormatArgs::none()), "No args");
}

#[test]
fn positional_numbers_and_text_mix() {
    let args = FormatArgs::positional([1.to_string(), "two".to_string()]);
    assert_eq!(format("{0}, {1}, {2}", &args), "1, two, {2}");
}

#[test]
fn formatter_modes_differ_only_on_repeats() {
    let args = FormatArgs::named([("x", "1")]);
    let first = TemplateFormatter::new(Occurrences::First);
    let all = TemplateFormatter::new(Occurrences::All);

    assert_eq!(first.format("{x}", &args), all.format("{x}", &args));
    assert_eq!(first.format("{x}{x}", &args), "1{x}");
    assert_eq!(all.format("{x}{x}", &args), "11");
}

#[test]
fn formatter_and_trimmer_are_shareable_across_threads() {
    let trimmer = std::sync::Arc::new(PatternTrimmer::new(Some("*")).unwrap());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let trimmer = std::sync::Arc::clone(&trimmer);
            std::thread::spawn(move || {
                let text = trimmer.trim(&format!("**{}**", i));
                format("item {0}", &FormatArgs::positional([text]))
            })
        })
        .collect();

    let results: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(results, vec!["item 0", "item 1", "item 2", "item 3"]);
}
