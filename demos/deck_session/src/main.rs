//! Deck Session Example
//!
//! Demonstrates retrace with a deck editing session. Two surfaces share
//! one timeline: edits recorded on one appear on the other, keyboard
//! shortcuts drive undo/redo, and a reversible effect keeps an external
//! flag in step with navigation.

use retrace_binding::{shared, KeyCombo, Modifiers, TimelineBinding};
use retrace_core::{ExportFormat, LogExporter, ReversibleEffect, Timeline, TimelineConfig};
use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Deck {
    name: String,
    cards: Vec<String>,
}

impl Deck {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            cards: Vec::new(),
        }
    }

    fn with_card(&self, card: &str) -> Self {
        let mut next = self.clone();
        next.cards.push(card.to_string());
        next
    }
}

fn main() {
    env_logger::init();

    println!("=== Retrace Deck Session Example ===\n");

    // One timeline shared by an editor panel and a sidebar
    let timeline = shared(Timeline::with_config(TimelineConfig::with_capacity(10)));

    let mut deck = Deck::new("Gruul Aggro");

    let editor = TimelineBinding::mount(Rc::clone(&timeline), &deck, |state: &Deck| {
        println!("  [editor]  {} shows {} card(s)", state.name, state.cards.len());
    });
    let sidebar = TimelineBinding::mount(Rc::clone(&timeline), &deck, |state: &Deck| {
        println!("  [sidebar] {} shows {} card(s)", state.name, state.cards.len());
    });

    println!("Mounted editor and sidebar on one timeline\n");

    // Record edits from the editor; the sidebar follows automatically
    println!("Recording edits...");
    deck = deck.with_card("Lightning Bolt");
    editor.record_action("Add Lightning Bolt", &deck);

    deck = deck.with_card("Llanowar Elves");
    editor.record_action("Add Llanowar Elves", &deck);

    // This edit also flips a favorite flag. The edit itself sets the flag;
    // the recorded effect replays that change when navigation crosses it.
    let favorite = Rc::new(Cell::new(false));
    favorite.set(true);
    deck = deck.with_card("Gruul Spellbreaker");
    editor.record_action_with_effect(
        "Add Gruul Spellbreaker (favorite)",
        &deck,
        ReversibleEffect::new(
            {
                let favorite = Rc::clone(&favorite);
                move || {
                    favorite.set(true);
                    println!("  (effect)  favorite flag set");
                    Ok(())
                }
            },
            {
                let favorite = Rc::clone(&favorite);
                move || {
                    favorite.set(false);
                    println!("  (effect)  favorite flag cleared");
                    Ok(())
                }
            },
        ),
    );

    println!(
        "\nDeck now has {} card(s), favorite = {}",
        deck.cards.len(),
        favorite.get()
    );

    // Keyboard-driven navigation
    println!("\nPressing Ctrl+Z twice...");
    let ctrl_z = KeyCombo::new('z', Modifiers::CTRL);
    editor.handle_key(ctrl_z);
    editor.handle_key(ctrl_z);
    println!("favorite after undos: {}", favorite.get());

    println!("\nPressing Ctrl+Y twice...");
    let ctrl_y = KeyCombo::new('y', Modifiers::CTRL);
    editor.handle_key(ctrl_y);
    editor.handle_key(ctrl_y);
    println!("favorite after redos: {}", favorite.get());

    // Jump all the way back to the baseline in one call
    println!("\nJumping to the baseline...");
    if let Some(state) = sidebar.jump_to(0) {
        println!("Back to '{}' with {} card(s)", state.name, state.cards.len());
    }
    println!("favorite after jump: {}", favorite.get());

    // The log reads newest first
    println!("\nHistory:");
    {
        let inner = timeline.borrow();
        for entry in inner.history() {
            println!(
                "  {}  {}",
                entry.recorded_at.format("%H:%M:%S"),
                entry.label
            );
        }
    }

    // Export the session for sharing
    {
        let inner = timeline.borrow();
        let exporter = LogExporter::new(&inner);
        match exporter.export(ExportFormat::Text) {
            Ok(text) => println!("\n{}", text),
            Err(e) => println!("export failed: {}", e),
        }
    }

    println!("=== Session Complete ===");
}
