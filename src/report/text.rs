use super::Report;
use chrono::{DateTime, SecondsFormat, Utc};

const RULE: &str = "==============================================================";

impl Report {
    /// Plain-text rendering. `generated_at` appears on exactly one line,
    /// labeled `Generated at:`, so two renders of the same tree differ only there.
    pub fn render_text(&self, generated_at: DateTime<Utc>) -> String {
        let mut output = String::new();

        output.push_str(&format!("{} execution plan report\n", crate::NAME));
        output.push_str(RULE);
        output.push('\n');
        output.push_str(&format!("Root:         {}\n", self.root));
        output.push_str(&format!(
            "Generated at: {}\n\n",
            generated_at.to_rfc3339_opts(SecondsFormat::Secs, true)
        ));

        output.push_str("Totals\n");
        output.push_str(&format!("  Entries:         {}\n", self.total_entries));
        output.push_str(&format!("  Files:           {}\n", self.total_files));
        output.push_str(&format!("  Directories:     {}\n", self.total_directories));
        output.push_str(&format!("  Lines:           {}\n", self.total_lines));
        output.push_str(&format!("  Planned entries: {}\n\n", self.planned_entries));

        output.push_str("Categories\n");
        output.push_str(&format!("  {:<22} {:>8} {:>10}\n", "category", "entries", "lines"));
        for (category, stats) in &self.categories {
            output.push_str(&format!(
                "  {:<22} {:>8} {:>10}\n",
                category.as_str(),
                stats.entries,
                stats.lines
            ));
        }
        output.push('\n');

        output.push_str(&format!(
            "Most specialized (tier >= {})\n",
            self.min_specialized_tier
        ));
        if self.specialized.is_empty() {
            output.push_str("  (none)\n");
        }
        for (i, entry) in self.specialized.iter().enumerate() {
            output.push_str(&format!(
                "  {:>2}. {} [{}, {}] {} lines, {} definitions\n",
                i + 1,
                entry.relative_path,
                entry.category,
                entry.complexity,
                entry.lines,
                entry.definitions
            ));
        }
        output.push('\n');

        output.push_str("Phases\n");
        for phase in &self.phases {
            output.push_str(&format!(
                "  Phase {:02}: {} ({}/{})\n",
                phase.index,
                phase.name,
                phase.entries.len(),
                phase.capacity
            ));
            if phase.entries.is_empty() {
                output.push_str("      (empty)\n");
            }
            for (i, path) in phase.entries.iter().enumerate() {
                output.push_str(&format!("      {:>2}. {}\n", i + 1, path));
            }
        }

        output
    }
}
