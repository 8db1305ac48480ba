use crate::pick::*;

use std::fs;

use serde::{Deserialize, Serialize};
use serde_json::Map as JSMap;
use serde_json::Value as JSValue;

pub const MAX_CHOICES_KEY: &str = "_max_choices";
pub const SHORTCUT_KEY: &str = "_shortcut";
pub const RANDOM_SEED_KEY: &str = "_random_seed";

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShortcutSettings {
    pub command: Option<String>,
    pub option: Option<usize>,
    pub count: Option<usize>,
}

/// Everything read from the configuration file.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct PickConfig {
    pub catalog: OptionCatalog,
    pub shortcut: Shortcut,
    pub random_seed: Option<u64>,
}

pub fn read_config(path: &str) -> PickResult<PickConfig> {
    info!("Attempting to read configuration file {:?}", path);
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    parse_config(&contents)
}

pub fn parse_config(contents: &str) -> PickResult<PickConfig> {
    let js: JSValue = serde_json::from_str(contents).context(ParsingJsonSnafu {})?;
    let obj: &JSMap<String, JSValue> = js.as_object().context(NotAnObjectSnafu {})?;

    let max_choices = obj
        .get(MAX_CHOICES_KEY)
        .context(MissingSettingSnafu {
            key: MAX_CHOICES_KEY,
        })
        .and_then(|v| read_js_int(v, MAX_CHOICES_KEY))? as usize;

    for key in obj.keys() {
        if key.starts_with(RESERVED_PREFIX)
            && ![MAX_CHOICES_KEY, SHORTCUT_KEY, RANDOM_SEED_KEY].contains(&key.as_str())
        {
            warn!("parse_config: ignoring unknown setting {:?}", key);
        }
    }

    let catalog = OptionCatalog::from_entries(obj.keys().map(|k| k.as_str()), max_choices);
    ensure!(!catalog.is_empty(), EmptyCatalogSnafu {});

    let shortcut = match obj.get(SHORTCUT_KEY) {
        Some(v) => read_shortcut(v)?,
        None => Shortcut::default(),
    };
    ensure!(
        shortcut.option < catalog.len(),
        UnknownShortcutOptionSnafu {
            option: shortcut.option
        }
    );

    let random_seed = match obj.get(RANDOM_SEED_KEY) {
        Some(v) => Some(read_js_int(v, RANDOM_SEED_KEY)?),
        None => None,
    };

    debug!(
        "parse_config: {} options, max choices: {}, shortcut: {:?}",
        catalog.len(),
        max_choices,
        shortcut
    );
    Ok(PickConfig {
        catalog,
        shortcut,
        random_seed,
    })
}

fn read_shortcut(js: &JSValue) -> PickResult<Shortcut> {
    let settings: ShortcutSettings =
        serde_json::from_value(js.clone()).context(ParsingShortcutSnafu {})?;
    let default = Shortcut::default();
    Ok(Shortcut {
        command: settings.command.unwrap_or(default.command),
        option: settings.option.unwrap_or(default.option),
        count: settings.count.unwrap_or(default.count),
    })
}

fn read_js_int(x: &JSValue, key: &str) -> PickResult<u64> {
    match x {
        JSValue::Number(n) => n.as_u64().context(ParsingJsonNumberSnafu { key }),
        JSValue::String(s) => s
            .trim()
            .parse::<u64>()
            .ok()
            .context(ParsingJsonNumberSnafu { key }),
        _ => None.context(ParsingJsonNumberSnafu { key }),
    }
}
