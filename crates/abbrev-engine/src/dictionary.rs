//! Word → abbreviation dictionary with a compiled whole-word matcher.

use abbrev_core::{AbbrevError, Result};
use regex::{Captures, Regex};
use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use crate::text::{apply_case, char_len, fold_key, normalize_whitespace};

/// Built-in HVAC/plumbing vocabulary. Later entries win under case-fold.
pub const DEFAULT_ABBREVIATIONS: &[(&str, &str)] = &[
    ("Accessory", "Accy"),
    ("Actuator", "Act"),
    ("Adapter", "Adapt"),
    ("Aluminum", "Alum"),
    ("Aluminium", "Alum"),
    ("Analog", "Anlg"),
    ("Averaging", "Avg"),
    ("BACnet", "Bnet"),
    ("Black", "Blk"),
    ("Blower", "Blwr"),
    ("Breaker", "Brkr"),
    ("Bronze", "Brz"),
    ("Butterfly", "Bfly"),
    ("Cable", "Cbl"),
    ("Capacitor", "Cap"),
    ("Capillary", "Cap"),
    ("Check", "Chk"),
    ("Compressor", "Comp"),
    ("Controller", "Ctrlr"),
    ("Cover", "Cvr"),
    ("Detector", "Detect"),
    ("Differential", "Diff"),
    ("Electric", "Elec"),
    ("Enclosure", "Encl"),
    ("Evaporator", "Evap"),
    ("Expansion", "Exp"),
    ("Flange", "Flg"),
    ("Flare", "Flr"),
    ("Floating", "Flt"),
    ("Gasket", "Gskt"),
    ("Hazardous", "Hzrd"),
    ("Heater", "Htr"),
    ("Heat", "Ht"),
    ("High", "Hi"),
    ("Level", "Lvl"),
    ("Low", "Lo"),
    ("Modulating", "Mod"),
    ("Modular", "Mod"),
    ("Motor", "Mtr"),
    ("Mounted", "Mtd"),
    ("Mount", "Mt"),
    ("Mounting", "Mtg"),
    ("Pack", "Pk"),
    ("Package", "Pkg"),
    ("Panel", "Pnl"),
    ("Plate", "Plt"),
    ("Pressure", "Press"),
    ("Probe", "Prb"),
    ("Programmable", "Prog"),
    ("Programming", "Prog"),
    ("Program", "Prog"),
    ("Regulator", "Reg"),
    ("Relay", "Rly"),
    ("Relief", "Rlf"),
    ("Remote", "Rmt"),
    ("Sensor", "Sens"),
    ("Sens", "Sns"),
    ("Setpoint", "SetPt"),
    ("Set Point", "SetPt"),
    ("StainlessSteel", "SS"),
    ("Stanless Steel", "SS"),
    ("Stainless Steel", "SS"),
    ("Sweat", "Swt"),
    ("Switch", "Sw"),
    ("Thermistor", "Thrmst"),
    ("Thermostat", "Tstat"),
    ("Transceiver", "Trnsvr"),
    ("Transmitter", "Trnsmt"),
    ("Water", "Wtr"),
    ("White", "Wht"),
    ("Without", "w/o"),
    ("With", "w/"),
    ("Explosion", "Expl"),
    ("Proof", "Prf"),
    ("Protection", "Prot"),
    ("Double", "Dbl"),
    ("Minutes", "Min"),
    ("Minute", "Min"),
    ("Inches", "\""),
    ("Inch", "\""),
    ("Piece", "Pc"),
    ("Voltage", "Volt"),
    ("Amps", "Amp"),
    ("Board", "Brd"),
    ("Extension", "Ext"),
    ("Transformer", "Xfrmr"),
    ("ExplPrf", "X-Prf"),
    ("Standard", "Std"),
    ("Round", "Rnd"),
    ("Density", "Dens"),
    ("Reflector", "Rflctr"),
    ("Disconnect", "Discon"),
    ("Regulating", "Reg"),
    ("Replacement", "Repl"),
    ("Infrared", "IR"),
    ("Filter", "Filt"),
    ("Pannel", "Pnl"),
    ("Included", "Incl"),
    ("Includes", "Incl"),
    ("Mted", "Mtd"),
    ("Position", "Pos"),
    ("Manual Reset", "MR"),
    ("Damper", "Dmpr"),
    ("Label", "Lbl"),
    ("Assemblies", "ASSY"),
    ("Assembled", "ASSD"),
    ("Cabinet", "CAB"),
    ("Cabinets", "CABS"),
    ("Factory", "FACT"),
    ("Showers", "SHWR"),
    ("Shower", "SHWR"),
    ("Recirculation", "RECIRC"),
    ("Piping", "PIPE"),
    ("Stainless", "STSTL"),
    ("Chrome", "CHR"),
    ("Plated", "PLT"),
    ("Thermostatic", "THERM"),
    ("Mixing", "MIX"),
    ("Exposed", "EXP"),
    ("Single", "SNGL"),
    ("Series", "SER"),
    ("Hydrotherapy", "HYDRO"),
    ("Connection", "CONN"),
    ("Capacity", "CAP"),
    ("Group", "GRP"),
    // domain overrides
    ("Copper", "Cop"),
    ("Lineset", "Lin"),
    ("Suction", "Suc"),
    ("Liquid", "Liq"),
    ("Discharge", "Dis"),
    ("Line", "Ln"),
    ("Temperature", "Temp"),
    ("Assembly", "Assy"),
    ("Control", "Ctrl"),
    ("System", "Sys"),
    ("Valve", "Vlv"),
    ("Conditioner", "Cond"),
];

static BUILTIN: LazyLock<Arc<Dictionary>> = LazyLock::new(|| {
    Arc::new(Dictionary::new(DEFAULT_ABBREVIATIONS.iter().copied()).expect("built-in dictionary compiles"))
});

/// Anything that can hand out a read-only dictionary snapshot.
pub trait DictionarySource: Send + Sync {
    fn snapshot(&self) -> Arc<Dictionary>;
}

impl DictionarySource for Arc<Dictionary> {
    fn snapshot(&self) -> Arc<Dictionary> {
        Arc::clone(self)
    }
}

#[derive(Debug, Clone)]
struct Entry {
    original: String,
    abbreviation: String,
}

/// Immutable dictionary snapshot. Updates build a new value.
#[derive(Debug, Clone)]
pub struct Dictionary {
    entries: HashMap<String, Entry>,
    matcher: Option<Regex>,
}

impl Dictionary {
    /// Build from `(word, abbreviation)` pairs. Keys are unique under
    /// case-fold; a later pair replaces an earlier one. Pairs with an empty
    /// side are ignored.
    pub fn new<I, K, V>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut entries = HashMap::new();
        for (k, v) in pairs {
            let original = normalize_whitespace(k.as_ref());
            let abbreviation = v.as_ref().trim().to_string();
            if original.is_empty() || abbreviation.is_empty() {
                continue;
            }
            entries.insert(fold_key(&original), Entry { original, abbreviation });
        }
        let matcher = compile_matcher(&entries)?;
        Ok(Self { entries, matcher })
    }

    /// The built-in vocabulary, shared.
    pub fn builtin() -> Arc<Self> {
        Arc::clone(&BUILTIN)
    }

    pub fn empty() -> Self {
        Self { entries: HashMap::new(), matcher: None }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Case-insensitive lookup.
    pub fn lookup(&self, word: &str) -> Option<&str> {
        self.entries.get(&fold_key(word)).map(|e| e.abbreviation.as_str())
    }

    pub fn contains(&self, word: &str) -> bool {
        self.entries.contains_key(&fold_key(word))
    }

    /// `(original, abbreviation)` pairs sorted by folded key.
    pub fn entries(&self) -> Vec<(String, String)> {
        let mut keys: Vec<_> = self.entries.keys().collect();
        keys.sort();
        keys.into_iter()
            .map(|k| {
                let e = &self.entries[k];
                (e.original.clone(), e.abbreviation.clone())
            })
            .collect()
    }

    pub fn to_map(&self) -> HashMap<String, String> {
        self.entries.values().map(|e| (e.original.clone(), e.abbreviation.clone())).collect()
    }

    /// New dictionary with `pairs` layered over this one.
    pub fn with_entries<I, K, V>(&self, pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let current = self.entries.values().map(|e| (e.original.clone(), e.abbreviation.clone()));
        let extra: Vec<(String, String)> = pairs
            .into_iter()
            .map(|(k, v)| (k.as_ref().to_string(), v.as_ref().to_string()))
            .collect();
        Self::new(current.chain(extra))
    }

    /// Replace every whole-word dictionary key in `text`, longest key first at
    /// each position, re-applying the matched token's case. A replacement that
    /// would lengthen the token is skipped.
    pub fn substitute(&self, text: &str) -> String {
        let Some(re) = &self.matcher else {
            return text.to_string();
        };
        re.replace_all(text, |caps: &Captures| {
            let matched = &caps[0];
            match self.entries.get(&fold_key(matched)) {
                Some(entry) => {
                    let cased = apply_case(matched, &entry.abbreviation);
                    if char_len(&cased) <= char_len(matched) { cased } else { matched.to_string() }
                }
                None => matched.to_string(),
            }
        })
        .into_owned()
    }
}

impl Default for Dictionary {
    fn default() -> Self {
        Self::builtin().as_ref().clone()
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Escaped pattern for one key: words joined by `\s+`, with `\b` on any edge
/// that is a word character.
fn key_pattern(key: &str) -> String {
    let body = key.split_whitespace().map(regex::escape).collect::<Vec<_>>().join(r"\s+");
    let lead = if key.chars().next().is_some_and(is_word_char) { r"\b" } else { "" };
    let tail = if key.chars().last().is_some_and(is_word_char) { r"\b" } else { "" };
    format!("{lead}{body}{tail}")
}

fn compile_matcher(entries: &HashMap<String, Entry>) -> Result<Option<Regex>> {
    if entries.is_empty() {
        return Ok(None);
    }
    let mut keys: Vec<&str> = entries.keys().map(String::as_str).collect();
    // Alternation is leftmost-first, so longer keys must come first.
    keys.sort_by(|a, b| char_len(b).cmp(&char_len(a)).then_with(|| a.cmp(b)));
    let alternation = keys.iter().map(|k| key_pattern(k)).collect::<Vec<_>>().join("|");
    Regex::new(&format!("(?i)(?:{alternation})"))
        .map(Some)
        .map_err(|e| AbbrevError::Dictionary(format!("failed to compile dictionary matcher: {e}")))
}
