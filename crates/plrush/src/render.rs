//! Terminal rendering for shell output
//!
//! Every method returns the text to print. With `json` set, structured
//! results are rendered as pretty JSON instead of tables.

use plrucache::{Entry, Key, Position, PriorityCache, PutOutcome, SearchHit, StatsSnapshot, Value};
use serde::Serialize;
use serde_json::json;

const RESET: &str = "\x1b[0m";
const RED: &str = "\x1b[1;31m";
const GREEN: &str = "\x1b[1;32m";
const YELLOW: &str = "\x1b[1;33m";
const BLUE: &str = "\x1b[1;34m";
const MAGENTA: &str = "\x1b[1;35m";
const CYAN: &str = "\x1b[1;36m";

/// Output style switches
#[derive(Debug, Clone, Copy, Default)]
pub struct Renderer {
    color: bool,
    json: bool,
}

#[derive(Serialize)]
struct TableRow {
    key: Key,
    value: Value,
    priority: i32,
    position: Position,
}

#[derive(Serialize)]
struct StatsView {
    #[serde(flatten)]
    stats: StatsSnapshot,
    hit_ratio: f64,
    resident: usize,
    capacity: usize,
    policy: String,
}

impl Renderer {
    pub fn new(color: bool, json: bool) -> Self {
        Self { color, json }
    }

    fn paint(&self, color: &str, text: &str) -> String {
        if self.color {
            format!("{}{}{}", color, text, RESET)
        } else {
            text.to_string()
        }
    }

    pub fn menu(&self) -> String {
        let rule = "=====================================================";
        let mut out = String::new();
        out.push('\n');
        out.push_str(&self.paint(BLUE, rule));
        out.push('\n');
        out.push_str(&self.paint(CYAN, "          LRU CACHE MANAGEMENT SYSTEM"));
        out.push('\n');
        out.push_str(&self.paint(BLUE, rule));
        out.push('\n');
        out.push_str(
            "1. Insert / Update Data\n\
             2. Get Value by Key (Update Order)\n\
             3. Display Cache Table\n\
             4. Show Cache Statistics\n\
             5. Show Evicted History\n\
             6. Clear Entire Cache\n\
             7. Save Cache to File\n\
             8. Search Key (Without Updating Order)\n\
             9. Exit Program\n",
        );
        out.push_str("-----------------------------------------------------\n");
        out
    }

    pub fn error(&self, message: &str) -> String {
        format!("{}\n", self.paint(RED, message))
    }

    pub fn info(&self, message: &str) -> String {
        format!("{}\n", self.paint(GREEN, message))
    }

    /// Describe a put; `stored` is the entry as it now sits in the cache
    pub fn put(&self, stored: &Entry, outcome: &PutOutcome) -> String {
        if self.json {
            return to_json(&json!({ "op": "put", "entry": stored, "outcome": outcome }));
        }

        match outcome {
            PutOutcome::Updated { .. } => {
                let line = format!(
                    "✅ Updated key {} with new value {} (Priority {})",
                    stored.key, stored.value, stored.priority
                );
                format!("{}\n", self.paint(GREEN, &line))
            }
            PutOutcome::Inserted { evicted } => {
                let mut out = String::new();
                if let Some(victim) = evicted {
                    let line = format!(
                        "⚠️  Cache full! Evicting [{}:{}] (Priority {})",
                        victim.key, victim.value, victim.priority
                    );
                    out.push_str(&self.paint(RED, &line));
                    out.push('\n');
                }
                let line = format!(
                    "🆕 Inserted key {} -> value {} (Priority {})",
                    stored.key, stored.value, stored.priority
                );
                out.push_str(&self.paint(CYAN, &line));
                out.push('\n');
                out
            }
        }
    }

    pub fn get(&self, key: Key, value: Option<Value>) -> String {
        if self.json {
            return to_json(&json!({ "op": "get", "key": key, "value": value }));
        }

        match value {
            Some(value) => {
                let line = format!("✅ Cache Hit! Key {} found. Value = {}", key, value);
                format!("{}\n", self.paint(GREEN, &line))
            }
            None => {
                let line = format!("❌ Cache Miss! Key {} not found.", key);
                format!("{}\n", self.paint(YELLOW, &line))
            }
        }
    }

    pub fn table(&self, cache: &PriorityCache) -> String {
        let last = cache.len().saturating_sub(1);
        let rows: Vec<TableRow> = cache
            .entries()
            .enumerate()
            .map(|(rank, entry)| TableRow {
                key: entry.key,
                value: entry.value,
                priority: entry.priority,
                position: Position::classify(rank, last),
            })
            .collect();

        if self.json {
            return to_json(&rows);
        }

        let mut out = String::new();
        out.push('\n');
        out.push_str(&self.paint(BLUE, "================ CACHE TABLE ================"));
        out.push('\n');
        if rows.is_empty() {
            out.push_str(&self.error("Cache is empty!"));
            return out;
        }

        let border = "+-------------------------------------------+";
        out.push_str(&self.paint(MAGENTA, border));
        out.push('\n');
        out.push_str(&self.paint(MAGENTA, "|  Key  |  Value  | Priority | Position     |"));
        out.push('\n');
        out.push_str(&self.paint(MAGENTA, border));
        out.push('\n');
        for row in &rows {
            let (label, color) = match row.position {
                Position::Front => ("HEAD", Some(GREEN)),
                Position::Back => ("TAIL", Some(YELLOW)),
                Position::Interior => ("-", None),
            };
            let line = format!(
                "|  {:<4} |  {:<6} |   {:<7}| {:<12} |",
                row.key, row.value, row.priority, label
            );
            match color {
                Some(color) => out.push_str(&self.paint(color, &line)),
                None => out.push_str(&line),
            }
            out.push('\n');
        }
        out.push_str(&self.paint(MAGENTA, border));
        out.push('\n');

        out.push('\n');
        out.push_str(&self.paint(BLUE, "Cache Visualization:"));
        out.push('\n');
        out.push_str(&self.paint(GREEN, "HEAD → "));
        let chain: Vec<String> = rows.iter().map(|row| format!("[Key:{}]", row.key)).collect();
        out.push_str(&chain.join(" → "));
        out.push_str(&self.paint(GREEN, " → TAIL"));
        out.push('\n');
        out
    }

    pub fn stats(&self, cache: &PriorityCache) -> String {
        let stats = cache.stats();
        if self.json {
            return to_json(&StatsView {
                stats,
                hit_ratio: stats.hit_ratio(),
                resident: cache.len(),
                capacity: cache.capacity(),
                policy: cache.policy().to_string(),
            });
        }

        let mut out = String::new();
        out.push('\n');
        out.push_str(&self.paint(CYAN, "================ CACHE STATISTICS ================"));
        out.push('\n');
        out.push_str(&self.paint(GREEN, &format!("Cache Hits: {}", stats.hits)));
        out.push('\n');
        out.push_str(&self.paint(YELLOW, &format!("Cache Misses: {}", stats.misses)));
        out.push('\n');
        out.push_str(&self.paint(RED, &format!("Total Evictions: {}", stats.evictions)));
        out.push('\n');
        out.push_str(&self.paint(
            MAGENTA,
            &format!("Evicted History Count: {}", stats.ledger_len),
        ));
        out.push('\n');
        out.push_str(&format!(
            "Hit Ratio: {:.1}%\nResident: {}/{}\nPolicy: {}\n",
            stats.hit_ratio() * 100.0,
            cache.len(),
            cache.capacity(),
            cache.policy()
        ));
        out
    }

    pub fn history(&self, evicted: &[Entry]) -> String {
        if self.json {
            return to_json(&evicted);
        }

        let mut out = String::new();
        out.push('\n');
        out.push_str(&self.paint(CYAN, "================ EVICTED CACHE HISTORY ================"));
        out.push('\n');
        if evicted.is_empty() {
            out.push_str(&self.error("No evicted cache entries yet."));
            return out;
        }
        let items: Vec<String> = evicted
            .iter()
            .map(|e| format!("[{}:{} (P{})]", e.key, e.value, e.priority))
            .collect();
        out.push_str(&items.join(" "));
        out.push('\n');
        out
    }

    pub fn search(&self, key: Key, hit: Option<&SearchHit>) -> String {
        if self.json {
            return to_json(&json!({ "op": "search", "key": key, "hit": hit }));
        }

        let hit = match hit {
            Some(hit) => hit,
            None => return self.error(&format!("❌ Key {} not found in cache.", key)),
        };

        let border = "+-------------------------------+";
        let mut out = String::new();
        out.push('\n');
        out.push_str(&self.paint(GREEN, "🔍 Search Result:"));
        out.push('\n');
        out.push_str(&self.paint(MAGENTA, border));
        out.push('\n');
        out.push_str("| Key | Value | Priority | Pos. |\n");
        out.push_str(&self.paint(MAGENTA, border));
        out.push('\n');
        let (label, color) = match hit.position {
            Position::Front => ("HEAD", Some(GREEN)),
            Position::Back => ("TAIL", Some(YELLOW)),
            Position::Interior => ("MID", None),
        };
        let line = format!(
            "| {:<3} | {:<5} | {:<8} | {:<4} |",
            hit.entry.key, hit.entry.value, hit.entry.priority, label
        );
        match color {
            Some(color) => out.push_str(&self.paint(color, &line)),
            None => out.push_str(&line),
        }
        out.push('\n');
        out.push_str(&self.paint(MAGENTA, border));
        out.push('\n');
        out
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> String {
    match serde_json::to_string_pretty(value) {
        Ok(text) => format!("{}\n", text),
        Err(e) => format!("{{\"error\": \"{}\"}}\n", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plrucache::EvictionPolicy;

    fn plain() -> Renderer {
        Renderer::new(false, false)
    }

    fn cache() -> PriorityCache {
        let mut cache = PriorityCache::new(3, EvictionPolicy::hybrid()).unwrap();
        cache.put_with_priority(1, 10, 1);
        cache.put_with_priority(2, 20, 3);
        cache.put_with_priority(3, 30, 2);
        cache
    }

    #[test]
    fn test_paint_respects_color_flag() {
        assert_eq!(plain().paint(RED, "x"), "x");
        assert_eq!(Renderer::new(true, false).paint(RED, "x"), "\x1b[1;31mx\x1b[0m");
    }

    #[test]
    fn test_table_markers() {
        let text = plain().table(&cache());
        assert!(text.contains("HEAD"));
        assert!(text.contains("TAIL"));
        assert!(text.contains("HEAD → [Key:3] → [Key:2] → [Key:1] → TAIL"));
    }

    #[test]
    fn test_table_empty() {
        let empty = PriorityCache::new(1, EvictionPolicy::Lru).unwrap();
        assert!(plain().table(&empty).contains("Cache is empty!"));
    }

    #[test]
    fn test_put_eviction_message() {
        let outcome = PutOutcome::Inserted {
            evicted: Some(Entry::new(2, 20, 3)),
        };
        let text = plain().put(&Entry::new(4, 40, 1), &outcome);
        assert!(text.contains("Evicting [2:20] (Priority 3)"));
        assert!(text.contains("Inserted key 4 -> value 40 (Priority 1)"));
    }

    #[test]
    fn test_put_update_shows_new_priority() {
        let outcome = PutOutcome::Updated {
            previous: Entry::new(1, 10, 1),
        };
        let text = plain().put(&Entry::new(1, 11, 3), &outcome);
        assert!(text.contains("Updated key 1 with new value 11 (Priority 3)"));
        assert!(!text.contains("Priority 1"));
    }

    #[test]
    fn test_search_positions() {
        let cache = cache();
        let back = cache.search(1).unwrap();
        assert!(plain().search(1, Some(&back)).contains("TAIL"));

        let mid = cache.search(2).unwrap();
        assert!(plain().search(2, Some(&mid)).contains("MID"));

        assert!(plain().search(9, None).contains("Key 9 not found"));
    }

    #[test]
    fn test_history() {
        let text = plain().history(&[Entry::new(1, 10, 1), Entry::new(2, 20, 3)]);
        assert!(text.contains("[1:10 (P1)] [2:20 (P3)]"));
        assert!(plain().history(&[]).contains("No evicted cache entries yet."));
    }

    #[test]
    fn test_json_table() {
        let text = Renderer::new(false, true).table(&cache());
        let rows: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(rows[0]["key"], 3);
        assert_eq!(rows[0]["position"], "front");
        assert_eq!(rows[2]["position"], "back");
    }

    #[test]
    fn test_json_stats() {
        let mut cache = cache();
        cache.get(1);
        cache.get(7);
        let text = Renderer::new(false, true).stats(&cache);
        let stats: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(stats["hits"], 1);
        assert_eq!(stats["misses"], 1);
        assert_eq!(stats["capacity"], 3);
        assert_eq!(stats["hit_ratio"], 0.5);
    }
}
