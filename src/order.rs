//! Order summary and its hand-off as a `mailto:` link.

use crate::classify::Category;
use crate::configurator::ChosenColors;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderSettings {
    pub recipient: String,
    pub subject: String,
}

impl Default for OrderSettings {
    fn default() -> Self {
        Self {
            recipient: "tu-email@dominio.com".to_string(),
            subject: "Nuevo Pedido de Controlador Personalizado".to_string(),
        }
    }
}

/// Chosen color name per category at submission time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderSummary {
    pub chasis: String,
    pub buttons: String,
    pub knobs: String,
}

impl OrderSummary {
    pub fn from_chosen(chosen: &ChosenColors) -> Self {
        Self {
            chasis: chosen.name_or_sentinel(Category::Chasis).to_string(),
            buttons: chosen.name_or_sentinel(Category::Buttons).to_string(),
            knobs: chosen.name_or_sentinel(Category::Knobs).to_string(),
        }
    }

    pub fn body(&self) -> String {
        format!(
            "¡Hola!\n\nMe gustaría realizar un pedido con la siguiente configuración:\n\n\
             - Chasis: {}\n- Botones: {}\n- Knobs: {}\n\nGracias.",
            self.chasis, self.buttons, self.knobs
        )
    }

    pub fn mailto_uri(&self, settings: &OrderSettings) -> String {
        format!(
            "mailto:{}?subject={}&body={}",
            settings.recipient,
            urlencoding::encode(&settings.subject),
            urlencoding::encode(&self.body())
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary() -> OrderSummary {
        let mut chosen = ChosenColors::default();
        chosen.set(Category::Chasis, Some("Rojo Metálico".to_string()));
        chosen.set(Category::Buttons, Some("Negro Clásico".to_string()));
        OrderSummary::from_chosen(&chosen)
    }

    #[test]
    fn missing_names_use_the_sentinel() {
        let summary = summary();
        assert_eq!(summary.chasis, "Rojo Metálico");
        assert_eq!(summary.knobs, "undefined");
        assert!(summary.body().contains("- Knobs: undefined"));
    }

    #[test]
    fn mailto_is_percent_encoded() {
        let settings = OrderSettings {
            recipient: "orders@example.com".to_string(),
            subject: "Pedido & más".to_string(),
        };
        let uri = summary().mailto_uri(&settings);
        assert!(uri.starts_with("mailto:orders@example.com?subject=Pedido%20%26%20m%C3%A1s&body="));
        assert!(uri.contains("Rojo%20Met%C3%A1lico"));
        assert!(uri.contains("%0A"));
        assert!(!uri.contains(' '));
        assert!(!uri.contains('\n'));

        let body = uri.split("&body=").nth(1).unwrap();
        assert_eq!(urlencoding::decode(body).unwrap(), summary().body());
    }
}
