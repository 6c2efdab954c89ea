use dfwiki_core::{
    Entry, EntryIndex, Library, MemoryStore, ResolveError, Resolver, SpanKind, VocabularyMap,
    match_entries, protect, render, translate_by_vocabulary,
};
use dfwiki_types::Language;
use pretty_assertions::assert_eq;

fn wiki() -> MemoryStore {
    MemoryStore::from_entries(
        Language::Source,
        [
            Entry::new(
                "Your first fortress",
                "==Embark==\nPick a site with a [[river]].\n{|\n! Token !! Value\n|-\n| _LAND_HOLDER_ || river\n|}",
                Language::Source,
            ),
            Entry::new("Quickstart", "#REDIRECT [[Your first fortress]]", Language::Source),
            Entry::new("River", "A '''river''' carries water. See [[Dwarf|dwarves]].", Language::Source),
            Entry::new("Dwarf", "[[File:dwarf.png|64px]]\nA dwarf.", Language::Source),
        ],
    )
}

#[test]
fn recognized_filename_resolves_through_redirect_to_html() {
    let library = Library::new(wiki());

    let hits = library.lookup("Quickstart.txt");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].name, "Your first fortress");

    let page = library.present(&hits[0], Language::Source);
    assert!(page.html.starts_with("<h1>Your first fortress</h1>"));
    assert!(page.html.contains(">Embark</h2>"));
    assert!(page.html.contains("href=\"wiki:river\""));
    assert!(page.html.contains("<td>_LAND_HOLDER_</td>"));
    assert!(!page.html.contains("<i>"));
}

#[test]
fn links_in_rendered_pages_can_be_followed() {
    let library = Library::new(wiki());
    let river = library.follow_link("wiki:river").expect("river exists");
    let html = render(&river.content).html;
    assert!(html.contains("<b>river</b>"));

    let dwarf = library.follow_link("wiki:dwarf").expect("dwarf exists");
    let page = library.present(&dwarf, Language::Source);
    assert_eq!(page.media.len(), 1);
    assert_eq!(page.media.values().next().map(String::as_str), Some("Dwarf.png"));

    assert_eq!(
        library.follow_link("wiki:goblin").map(|h| h.name),
        Err(ResolveError::NotFound("goblin".to_string()))
    );
}

#[test]
fn vocabulary_fallback_keeps_markup_intact() {
    let vocabulary = VocabularyMap::new([("river", "河流"), ("water", "水"), ("dwarf", "矮人")]);
    let content = "A '''river''' carries water. See [[Dwarf|dwarves]].";

    let translated = translate_by_vocabulary(content, &vocabulary);
    assert_eq!(translated, "A '''河流''' carries 水. See [[Dwarf|dwarves]].");

    let html = render(&translated).html;
    assert!(html.contains("<b>河流</b>"));
    assert!(html.contains("href=\"wiki:dwarf\""));
}

#[test]
fn protector_round_trips_mixed_markup() {
    let text = "{{Quality|Exceptional}} [[File:a.png]] <br/> [[a|b]] https://x.org/y?z=1 tail";
    let protected = protect(text, &SpanKind::ALL);
    assert!(!protected.text.contains("[["));
    assert!(!protected.text.contains("https://"));
    assert_eq!(protected.table.restore(&protected.text), text);
}

#[test]
fn matcher_and_resolver_compose_over_a_store() {
    let store = wiki();
    let index = EntryIndex::from_store(&store);
    let names = match_entries("quick start\nriv", &index);
    assert_eq!(names, vec!["Quickstart".to_string(), "River".to_string()]);

    let resolved = Resolver::with_max_hops(1).resolve("Quickstart", &store);
    assert!(matches!(resolved, Err(ResolveError::RedirectLoop { hops: 1, .. })));
}
