pub const CONFIG_TEMPLATE: &str = r#"# devhub configuration. Every key is optional; the values below are the defaults.

[hook]
# extensions = ["js", "jsx", "ts", "tsx", "json", "css", "md"]
# local_formatter = "node_modules/.bin/prettier"
# fallback_formatter = ["npx", "prettier"]
# formatter_args = ["--write"]

[hub]
# path = ".claude/context-hub.md"
"#;
