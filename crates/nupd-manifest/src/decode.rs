//! Field decoding for the `HOSTS` section and component sections.
//!
//! Conversions return `Result`; the section decoders report failures to the
//! [`WarningSink`] and leave the attribute at its zero value.

use chrono::NaiveDate;

use crate::{
    document::Section,
    model::{Channel, Component, HostLists},
    warning::{FieldWarning, WarningKind, WarningSink},
};

pub const HOSTS_SEPARATOR: &str = ", ";
pub const GROUP_SEPARATOR: char = ',';
pub const DATE_FORMAT: &str = "%d.%m.%Y";

/// Parses a `u64`, detecting the base from its prefix.
///
/// `0x`/`0X` is hexadecimal, `0o`/`0O` or a bare leading `0` octal, `0b`/`0B`
/// binary, anything else decimal. `_` digit separators are ignored. Signs and
/// whitespace are rejected.
pub fn parse_u64(raw: &str) -> Result<u64, WarningKind> {
    let digits = raw.replace('_', "");
    let (radix, body) = match digits.as_bytes() {
        [b'0', b'x' | b'X', ..] => (16, &digits[2..]),
        [b'0', b'o' | b'O', ..] => (8, &digits[2..]),
        [b'0', b'b' | b'B', ..] => (2, &digits[2..]),
        [b'0', _, ..] => (8, &digits[1..]),
        _ => (10, digits.as_str()),
    };

    if body.is_empty() || !body.chars().all(|c| c.is_digit(radix)) {
        return Err(WarningKind::InvalidInteger);
    }
    u64::from_str_radix(body, radix).map_err(|_| WarningKind::InvalidInteger)
}

/// Parses a `DD.MM.YYYY` date, e.g. `28.05.2019`.
///
/// Day and month must be two digits and the year four; the result must be a
/// real calendar date.
pub fn parse_release_date(raw: &str) -> Result<NaiveDate, WarningKind> {
    let b = raw.as_bytes();
    let shaped = b.len() == 10
        && b[2] == b'.'
        && b[5] == b'.'
        && b.iter()
            .enumerate()
            .all(|(i, c)| i == 2 || i == 5 || c.is_ascii_digit());
    if !shaped {
        return Err(WarningKind::InvalidDate);
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| WarningKind::InvalidDate)
}

/// Splits a host list value on `", "`, keeping entries verbatim.
pub fn split_hosts(raw: &str) -> Vec<String> {
    raw.split(HOSTS_SEPARATOR).map(str::to_string).collect()
}

/// Splits a group value on `,` without trimming.
pub fn split_group(raw: &str) -> Vec<String> {
    raw.split(GROUP_SEPARATOR).map(str::to_string).collect()
}

/// Decodes a `HOSTS` section into `hosts`. Keys other than the three channel
/// keys are ignored; channels the section does not mention are left as they
/// are, so repeated `HOSTS` sections merge key by key.
pub fn decode_hosts(section: &Section, hosts: &mut HostLists) {
    for (key, value) in section.iter() {
        if let Some(channel) = Channel::ALL.into_iter().find(|c| c.hosts_key() == key) {
            *hosts.channel_mut(channel) = split_hosts(value);
        }
    }
}

/// Decodes one component section, reporting dropped fields to `sink`.
///
/// A repeated key overrides the earlier occurrence, even when the later
/// value does not convert.
pub fn decode_component(name: &str, section: &Section, sink: &dyn WarningSink) -> Component {
    let mut component = Component::default();

    let try_u64 = |key: &str, value: &str| {
        parse_u64(value)
            .map_err(|kind| report(sink, name, key, value, kind))
            .unwrap_or_default()
    };

    for (key, value) in section.iter() {
        match key {
            "version" => component.version = value.to_string(),
            "versionid" => component.version_id = try_u64(key, value),
            "build" => component.build = try_u64(key, value),
            "type" => component.kind = value.to_string(),
            "category" => component.category = value.to_string(),
            "level" => component.level = try_u64(key, value),
            "base" => component.base = try_u64(key, value),
            "date" => {
                component.release_date = parse_release_date(value)
                    .map_err(|kind| report(sink, name, key, value, kind))
                    .ok();
            }
            "platform" => component.platform = value.to_string(),
            "group" => component.group = split_group(value),
            "buildregname" => component.build_registry_name = value.to_string(),
            "file" => component.file = value.to_string(),
            "size" => component.size = try_u64(key, value),
            _ => {}
        }
    }

    component
}

fn report(sink: &dyn WarningSink, section: &str, key: &str, value: &str, kind: WarningKind) {
    sink.emit(FieldWarning {
        section: section.to_string(),
        key: key.to_string(),
        value: value.to_string(),
        kind,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::warning::{CollectorSink, NullSink};

    fn section(name: &str, entries: &[(&str, &str)]) -> Section {
        Section {
            name: Some(name.to_string()),
            entries: entries
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    #[test]
    fn test_parse_u64() {
        assert_eq!(parse_u64("0"), Ok(0));
        assert_eq!(parse_u64("268435456"), Ok(268435456));
        assert_eq!(parse_u64("18446744073709551615"), Ok(u64::MAX));
        assert_eq!(parse_u64("18446744073709551616"), Err(WarningKind::InvalidInteger));
        assert_eq!(parse_u64("NOTANUMBER"), Err(WarningKind::InvalidInteger));
        assert_eq!(parse_u64("+5"), Err(WarningKind::InvalidInteger));
        assert_eq!(parse_u64("-1"), Err(WarningKind::InvalidInteger));
        assert_eq!(parse_u64("1 2"), Err(WarningKind::InvalidInteger));
        assert_eq!(parse_u64(""), Err(WarningKind::InvalidInteger));
    }

    #[test]
    fn test_parse_u64_prefixes_and_separators() {
        assert_eq!(parse_u64("0x10000000"), Ok(268435456));
        assert_eq!(parse_u64("0XfF"), Ok(255));
        assert_eq!(parse_u64("010"), Ok(8));
        assert_eq!(parse_u64("0o17"), Ok(15));
        assert_eq!(parse_u64("0b101"), Ok(5));
        assert_eq!(parse_u64("1_000"), Ok(1000));
        assert_eq!(parse_u64("00"), Ok(0));
        assert_eq!(parse_u64("08"), Err(WarningKind::InvalidInteger));
        assert_eq!(parse_u64("0x"), Err(WarningKind::InvalidInteger));
        assert_eq!(parse_u64("0x+1"), Err(WarningKind::InvalidInteger));
        assert_eq!(parse_u64("0b102"), Err(WarningKind::InvalidInteger));
        assert_eq!(parse_u64("_"), Err(WarningKind::InvalidInteger));
    }

    #[test]
    fn test_parse_release_date() {
        assert_eq!(
            parse_release_date("28.05.2019"),
            Ok(NaiveDate::from_ymd_opt(2019, 5, 28).unwrap())
        );
        assert_eq!(parse_release_date("31/02/2019"), Err(WarningKind::InvalidDate));
        assert_eq!(parse_release_date("31.02.2019"), Err(WarningKind::InvalidDate));
        assert_eq!(parse_release_date("8.5.2019"), Err(WarningKind::InvalidDate));
        assert_eq!(parse_release_date("28.05.19"), Err(WarningKind::InvalidDate));
        assert_eq!(parse_release_date("2019-05-28"), Err(WarningKind::InvalidDate));
        assert_eq!(parse_release_date(""), Err(WarningKind::InvalidDate));
    }

    #[test]
    fn test_split_hosts() {
        assert_eq!(
            split_hosts("10@http://a/eset_upd/, 100000@http://b/eset_upd/"),
            vec!["10@http://a/eset_upd/", "100000@http://b/eset_upd/"]
        );
        // comma without a following space is not a separator
        assert_eq!(split_hosts("10@http://a/,20@http://b/"), vec!["10@http://a/,20@http://b/"]);
    }

    #[test]
    fn test_split_group_keeps_whitespace() {
        assert_eq!(split_group("perseus,ra,core,eslc"), vec!["perseus", "ra", "core", "eslc"]);
        assert_eq!(split_group("a, b"), vec!["a", " b"]);
    }

    #[test]
    fn test_decode_hosts() {
        let mut hosts = HostLists::default();
        decode_hosts(
            &section(
                "HOSTS",
                &[
                    ("Other", "10@http://a/, 20@http://b/"),
                    ("Prerelease-other", "10@http://a/pre/"),
                    ("other", "ignored"),
                    ("Unknown", "ignored"),
                ],
            ),
            &mut hosts,
        );
        assert_eq!(hosts.regular, vec!["10@http://a/", "20@http://b/"]);
        assert_eq!(hosts.prerelease, vec!["10@http://a/pre/"]);
        assert!(hosts.deferred.is_empty());
    }

    #[test]
    fn test_decode_hosts_merges_into_existing() {
        let mut hosts = HostLists::default();
        decode_hosts(&section("HOSTS", &[("Other", "10@http://a/")]), &mut hosts);
        decode_hosts(
            &section("HOSTS", &[("Deferred-other", "10@http://d/"), ("Other", "20@http://b/")]),
            &mut hosts,
        );
        assert_eq!(hosts.regular, vec!["20@http://b/"]);
        assert_eq!(hosts.deferred, vec!["10@http://d/"]);
    }

    #[test]
    fn test_decode_component_all_fields() {
        let sink = CollectorSink::default();
        let c = decode_component(
            "ENGINE0",
            &section(
                "ENGINE0",
                &[
                    ("version", "1031 (20190528)"),
                    ("versionid", "1031"),
                    ("build", "1032"),
                    ("type", "perseus"),
                    ("category", "engine"),
                    ("level", "0"),
                    ("base", "268435456"),
                    ("date", "28.05.2019"),
                    ("platform", "x86"),
                    ("group", "perseus,ra,core,eslc"),
                    ("buildregname", "PerseusBuild"),
                    ("file", "/v3-rel-sta/mod_001_perseus_2121/em001_32_l0.nup"),
                    ("size", "1220743"),
                ],
            ),
            &sink,
        );

        assert!(sink.is_empty());
        assert_eq!(
            c,
            Component {
                version: "1031 (20190528)".into(),
                version_id: 1031,
                build: 1032,
                kind: "perseus".into(),
                category: "engine".into(),
                level: 0,
                base: 268435456,
                release_date: NaiveDate::from_ymd_opt(2019, 5, 28),
                platform: "x86".into(),
                group: vec!["perseus".into(), "ra".into(), "core".into(), "eslc".into()],
                build_registry_name: "PerseusBuild".into(),
                file: "/v3-rel-sta/mod_001_perseus_2121/em001_32_l0.nup".into(),
                size: 1220743,
            }
        );
    }

    #[test]
    fn test_decode_component_reports_bad_fields() {
        let sink = CollectorSink::default();
        let c = decode_component(
            "ENGINE0",
            &section(
                "ENGINE0",
                &[
                    ("versionid", "NOTANUMBER"),
                    ("date", "31/02/2019"),
                    ("build", "7"),
                ],
            ),
            &sink,
        );

        assert_eq!(c.version_id, 0);
        assert_eq!(c.release_date, None);
        assert_eq!(c.build, 7);

        let warnings = sink.into_warnings();
        assert_eq!(warnings.len(), 2);
        assert_eq!(warnings[0].key, "versionid");
        assert_eq!(warnings[0].kind, WarningKind::InvalidInteger);
        assert_eq!(warnings[1].key, "date");
        assert_eq!(warnings[1].kind, WarningKind::InvalidDate);
        assert_eq!(warnings[1].section, "ENGINE0");
    }

    #[test]
    fn test_decode_component_keys_are_case_sensitive() {
        let c = decode_component(
            "A",
            &section("A", &[("Version", "1"), ("SIZE", "2"), ("foo", "bar")]),
            &NullSink,
        );
        assert_eq!(c, Component::default());
    }

    #[test]
    fn test_decode_component_repeated_key_last_occurrence_wins() {
        let sink = CollectorSink::default();
        let c = decode_component(
            "A",
            &section(
                "A",
                &[
                    ("size", "10"),
                    ("size", "oops"),
                    ("versionid", "5"),
                    ("versionid", ""),
                    ("date", "28.05.2019"),
                    ("date", "28/05/2019"),
                    ("build", "bad"),
                    ("build", "3"),
                    ("file", "a"),
                    ("file", "b"),
                ],
            ),
            &sink,
        );
        assert_eq!(c.size, 0);
        assert_eq!(c.version_id, 0);
        assert_eq!(c.release_date, None);
        assert_eq!(c.build, 3);
        assert_eq!(c.file, "b");
        assert_eq!(sink.len(), 4);
    }
}
