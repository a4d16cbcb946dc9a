//! Build a small index from an in-memory frequency list and run each of the
//! three query surfaces once.
//!
//! Run with:
//!     cargo run --example simple_usage

use libspell_core::{SymSpell, Verbosity};

fn print_suggestions(title: &str, suggestions: &[libspell_core::Suggestion]) {
    println!("-- {title} ({} suggestions) --", suggestions.len());
    for s in suggestions {
        println!("  term: {:<12} distance: {:>2} count: {}", s.term, s.distance, s.count);
    }
}

fn main() -> libspell_core::Result<()> {
    let dictionary = "\
the 23135851162
quick 413567185
brown 648262525
fox 273620358
jumps 58113541
over 5751509834
lazy 141234683
dog 1276852170
";
    let mut sym = SymSpell::new(2, 7, 1)?;
    sym.load_dictionary_stream(dictionary.as_bytes(), 0, 1, None);
    println!(
        "loaded {} words, {} delete buckets",
        sym.word_count(),
        sym.delete_count()
    );

    print_suggestions("lookup \"jumsp\"", &sym.lookup("jumsp", Verbosity::All, 2)?);

    let compound = sym.lookup_compound("the quck brwn fox", 2)?;
    print_suggestions("compound \"the quck brwn fox\"", &compound);

    let segmented = sym.word_segmentation("thequickbrownfox")?;
    println!(
        "-- segmentation --\n  {} (distance {})",
        segmented.corrected_string, segmented.distance_sum
    );
    Ok(())
}
