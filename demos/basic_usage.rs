// Example: Basic usage of the notemark-core library
use std::fs;

use notemark_core::filters::SortOption;
use notemark_core::models::UserId;
use notemark_core::session::Dashboard;
use notemark_core::storage::{AuthProvider, LocalAuth, SqliteStore};

fn main() -> anyhow::Result<()> {
    let db_path = "basic_usage_notemark.db";
    fs::remove_file(db_path).ok(); // Clean up previous run

    println!("--- Basic Usage of notemark-core ---");

    // ========== Open the store and sign in ==========
    println!("\n1. Opening store and signing in...");
    let store = SqliteStore::open(db_path)?;
    let auth = LocalAuth::signed_in(UserId::new("demo-user"));

    let mut dashboard = Dashboard::new();
    dashboard.session_changed(&store, auth.current_user())?;
    println!("   ✓ Signed in as {}", dashboard.user().unwrap());

    // ========== Create Categories ==========
    println!("\n2. Creating categories...");
    let work = dashboard.add_category(&store, "Work", Some("#3b82f6"))?;
    let ideas = dashboard.add_category(&store, "Ideas", Some("#e74c3c"))?;
    println!("   ✓ Created categories: {}, {}", work.name, ideas.name);

    // ========== Create Notes through the editor ==========
    println!("\n3. Writing notes...");
    dashboard.set_active_category(Some(work.id))?;

    dashboard.open_editor();
    dashboard.editor.set_title("Q4 Planning");
    dashboard.editor.set_content("<p>Launch the new feature and improve docs</p>");
    let planning = dashboard.save_editor(&store)?;
    println!("   ✓ Created note: {} (under {})", planning.title, work.name);

    dashboard.set_active_category(None)?;
    dashboard.open_editor();
    dashboard.editor.set_title("Grocery list");
    dashboard.editor.set_content("<p>Eggs, milk, coffee</p>");
    let groceries = dashboard.save_editor(&store)?;
    println!("   ✓ Created note: {}", groceries.title);

    // ========== Validation in action ==========
    println!("\n4. Trying to save an empty note...");
    dashboard.open_editor();
    dashboard.editor.set_title("Empty");
    dashboard.editor.set_content("<p></p>");
    match dashboard.save_editor(&store) {
        Err(err) => println!("   ✓ Rejected as expected: {}", err),
        Ok(_) => println!("   ✗ Unexpectedly saved"),
    }
    dashboard.editor.cancel();

    // ========== Pin and sort ==========
    println!("\n5. Pinning and sorting...");
    dashboard.notes.toggle_pin(&store, &groceries.id)?;
    dashboard.set_sort(SortOption::Pinned);
    for note in dashboard.visible_notes() {
        let marker = if note.pinned { "*" } else { " " };
        println!("   {} {}", marker, note.title);
    }

    // ========== Search ==========
    println!("\n6. Searching...");
    dashboard.set_search("feature");
    let hits = dashboard.visible_notes();
    println!("   • Search for 'feature': {} result(s)", hits.len());
    for note in &hits {
        println!("     - {}: {}", note.title, note.preview(50));
    }
    dashboard.set_search("");

    // ========== Category deletion does not cascade ==========
    println!("\n7. Deleting the Work category...");
    dashboard.remove_category(&store, work.id)?;
    let planning_after = dashboard.notes.get(&planning.id).unwrap();
    println!(
        "   • Note '{}' keeps category_id {:?} and now shows as uncategorized",
        planning_after.title, planning_after.category_id
    );

    // ========== Export ==========
    println!("\n8. Exporting to JSON...");
    let json = serde_json::to_string_pretty(dashboard.notes.all())?;
    println!("   • {} bytes of notes JSON", json.len());

    // ========== Sign out ==========
    println!("\n9. Signing out...");
    dashboard.session_changed(&store, None)?;
    println!("   • Notes in memory after sign-out: {}", dashboard.notes.len());

    println!("\n✅ Example completed successfully!");
    println!("\nDatabase file: {}", db_path);
    println!("You can inspect it with: sqlite3 {}", db_path);

    Ok(())
}
