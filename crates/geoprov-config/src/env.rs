// Verbatim environment provider.
//
// `Env::prefixed` guesses a type for every value, so `GSINIT_PASSWORD=007`
// would arrive as the integer 7. Keys listed in `TEXT_KEYS` are read here
// as plain strings instead and excluded from the typed provider.

use figment::value::{Dict, Map, Value};
use figment::{Error, Metadata, Profile, Provider};

/// Settings keys whose environment values are passed through unparsed.
pub(crate) const TEXT_KEYS: &[&str] = &[
    "url",
    "user",
    "password",
    "workspaces",
    "pg_workspace",
    "pg_datastore",
    "pg_host",
    "pg_user",
    "pg_schema",
    "pg_database",
    "secrets_dir",
    "ca_cert",
    "new_user",
    "new_password",
    "pg_password",
];

/// Reads `{prefix}{KEY}` for each of `keys` as an untyped string.
pub(crate) struct TextEnv {
    prefix: &'static str,
    keys: &'static [&'static str],
}

impl TextEnv {
    pub(crate) fn new(prefix: &'static str, keys: &'static [&'static str]) -> Self {
        Self { prefix, keys }
    }
}

impl Provider for TextEnv {
    fn metadata(&self) -> Metadata {
        Metadata::named(format!("`{}*` environment variables", self.prefix))
    }

    fn data(&self) -> Result<Map<Profile, Dict>, Error> {
        let mut dict = Dict::new();
        for key in self.keys {
            let var = format!("{}{}", self.prefix, key.to_ascii_uppercase());
            if let Ok(value) = std::env::var(&var) {
                dict.insert((*key).to_owned(), Value::from(value));
            }
        }
        Ok(Map::from([(Profile::Default, dict)]))
    }
}

#[cfg(test)]
mod tests {
    use figment::{Figment, Jail};

    use super::TextEnv;

    #[test]
    fn numeric_looking_values_stay_text() {
        Jail::expect_with(|jail| {
            jail.set_env("APP_SECRET", "007");
            jail.set_env("APP_RATIO", "1.50");

            let figment = Figment::from(TextEnv::new("APP_", &["secret", "ratio", "absent"]));
            assert_eq!(figment.extract_inner::<String>("secret")?, "007");
            assert_eq!(figment.extract_inner::<String>("ratio")?, "1.50");
            assert!(figment.find_value("absent").is_err());
            Ok(())
        });
    }
}
