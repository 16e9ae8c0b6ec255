//! Static UI string tables.
//!
//! Spanish is the default; any unrecognized language code falls back to
//! English.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lang {
    Es,
    En,
}

impl Lang {
    pub fn from_code(code: &str) -> Self {
        match code.to_lowercase().as_str() {
            "es" => Lang::Es,
            _ => Lang::En,
        }
    }

    pub fn feels_like(&self) -> &'static str {
        match self {
            Lang::Es => "sensación",
            Lang::En => "feels like",
        }
    }

    pub fn humidity(&self) -> &'static str {
        match self {
            Lang::Es => "Humedad",
            Lang::En => "Humidity",
        }
    }

    pub fn wind(&self) -> &'static str {
        match self {
            Lang::Es => "Viento",
            Lang::En => "Wind",
        }
    }

    pub fn forecast_title(&self) -> &'static str {
        match self {
            Lang::Es => "Pronóstico de 5 días",
            Lang::En => "5-day forecast",
        }
    }

    pub fn history_title(&self) -> &'static str {
        match self {
            Lang::Es => "Ubicaciones guardadas",
            Lang::En => "Saved locations",
        }
    }

    pub fn history_empty(&self) -> &'static str {
        match self {
            Lang::Es => "No hay ubicaciones guardadas. Busca una ciudad para guardarla.",
            Lang::En => "No saved locations yet. Search for a city to save it.",
        }
    }

    pub fn no_suggestions(&self) -> &'static str {
        match self {
            Lang::Es => "Sin sugerencias.",
            Lang::En => "No suggestions.",
        }
    }

    pub fn configured(&self) -> &'static str {
        match self {
            Lang::Es => "Configuración guardada.",
            Lang::En => "Configuration saved.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_resolve() {
        assert_eq!(Lang::from_code("es"), Lang::Es);
        assert_eq!(Lang::from_code("ES"), Lang::Es);
        assert_eq!(Lang::from_code("en"), Lang::En);
    }

    #[test]
    fn unknown_codes_fall_back_to_english() {
        assert_eq!(Lang::from_code("fr"), Lang::En);
        assert_eq!(Lang::from_code(""), Lang::En);
    }
}
