use wbi_dashboard::{EntityMap, Error};

#[test]
fn default_set_filter() {
    let m = EntityMap::default_set();
    assert_eq!(m.len(), 12);
    assert_eq!(
        m.country_filter(),
        "can;usa;bra;fra;ind;ita;deu;gbr;chn;jpn;rus;tkm"
    );
    assert_eq!(m.names().next(), Some("Canada"));
    assert_eq!(m.names().last(), Some("Turkmenistan"));
}

#[test]
fn empty_map_falls_back_to_defaults() {
    assert_eq!(EntityMap::new().or_default(), EntityMap::default_set());
    let mine = EntityMap::from_pairs([("Chile", "CHL")]).unwrap();
    assert_eq!(mine.clone().or_default(), mine);
}

#[test]
fn parse_keeps_insertion_order() {
    let m = EntityMap::parse("Japan=JPN; Brazil=BRA,India=IND").unwrap();
    assert_eq!(m.names().collect::<Vec<_>>(), vec!["Japan", "Brazil", "India"]);
    assert_eq!(m.country_filter(), "jpn;bra;ind");
    assert!(EntityMap::parse("").unwrap().is_empty());
}

#[test]
fn parse_rejects_malformed_pairs() {
    for bad in ["Japan", "Japan=", "=JPN"] {
        assert!(
            matches!(EntityMap::parse(bad), Err(Error::InvalidEntity(_))),
            "{bad} should be rejected"
        );
    }
}

#[test]
fn filter_escapes_odd_codes() {
    let m = EntityMap::from_pairs([("Weird", "A B")]).unwrap();
    assert_eq!(m.country_filter(), "a%20b");
}
