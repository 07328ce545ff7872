/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# wirechat configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[endpoint]
# url = "http://localhost:8000"   # http, https, ws or wss
# connect_timeout = 15            # seconds, 1-120

[ui]
# input_key = "userInput"
# display_key = "chat"
# reply_prefix = "Bot: "

[logging]
# level = "INFO"                  # DEBUG, INFO, WARNING, ERROR
"##
    .to_string()
}
