//! gate CLI 分发：`run`、`doctor`、`version`。

use anyhow::anyhow;
use serde_json::json;

use crate::{auth::token_crypto::fingerprint, config::AppConfig};

/// CLI 分发结果。
pub(crate) enum CliDispatch {
    /// 继续进入 gate 主循环。
    Run,
    /// 命令已处理完成，主程序应退出。
    Exit,
}

/// 解析并执行 gate CLI。
pub(crate) fn dispatch(args: &[String]) -> anyhow::Result<CliDispatch> {
    if args.is_empty() {
        return Ok(CliDispatch::Run);
    }

    let cmd = args[0].trim();
    if cmd.is_empty() || cmd == "run" {
        return Ok(CliDispatch::Run);
    }

    if matches!(cmd, "-h" | "--help" | "help") {
        print_root_help();
        return Ok(CliDispatch::Exit);
    }

    match cmd {
        "doctor" => {
            let format = parse_doctor_format(&args[1..])?;
            let config = AppConfig::from_env()?;
            println!("{}", render_doctor(&config, format));
            if !config.index_path().is_file() {
                std::process::exit(1);
            }
            Ok(CliDispatch::Exit)
        }
        "version" => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            Ok(CliDispatch::Exit)
        }
        other => Err(anyhow!(
            "unknown command: {other}; run `tg-gate --help` for usage"
        )),
    }
}

/// `doctor` 输出格式。
#[derive(Debug, Eq, PartialEq)]
enum DoctorFormat {
    Text,
    Json,
}

/// 解析 doctor 的 `--format` 参数。
fn parse_doctor_format(args: &[String]) -> anyhow::Result<DoctorFormat> {
    if args.is_empty() {
        return Ok(DoctorFormat::Text);
    }
    if args.len() == 2 && args[0] == "--format" {
        return match args[1].as_str() {
            "text" => Ok(DoctorFormat::Text),
            "json" => Ok(DoctorFormat::Json),
            other => Err(anyhow!("unsupported doctor format: {other}")),
        };
    }
    Err(anyhow!("usage: tg-gate doctor [--format text|json]"))
}

/// 渲染 doctor 信息；密钥只输出来源与指纹。
fn render_doctor(config: &AppConfig, format: DoctorFormat) -> String {
    let index = config.index_path();
    let index_present = index.is_file();
    let secret_fp = fingerprint(&config.secret);

    match format {
        DoctorFormat::Text => [
            format!("listen-addr: {}", config.listen_addr()),
            format!("static-index: {}", index.display()),
            format!("static-index-present: {}", if index_present { "yes" } else { "no" }),
            format!("token-ttl-min: {}", config.token_ttl_min),
            format!("secret-source: {}", config.secret_source.as_str()),
            format!("secret-fingerprint: {secret_fp}"),
        ]
        .join("\n"),
        DoctorFormat::Json => {
            let payload = json!({
                "listenAddr": config.listen_addr(),
                "staticIndex": index.display().to_string(),
                "staticIndexPresent": index_present,
                "tokenTtlMin": config.token_ttl_min,
                "secretSource": config.secret_source.as_str(),
                "secretFingerprint": secret_fp,
            });
            serde_json::to_string_pretty(&payload).unwrap_or_else(|_| "{}".to_string())
        }
    }
}

/// 打印 root help。
fn print_root_help() {
    println!("tg-gate usage:");
    println!("  tg-gate run");
    println!("  tg-gate doctor [--format text|json]");
    println!("  tg-gate version");
    println!();
    println!("environment:");
    println!("  PORT                 listen port (default 5050)");
    println!("  HOST                 listen host (default 0.0.0.0)");
    println!("  AUTH_SECRET_KEY      token signing secret (random per process if unset)");
    println!("  AUTH_TOKEN_TTL_MIN   login token lifetime in minutes (default 60)");
    println!("  AUTH_STATIC_DIR      directory holding index.html (default .)");
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use super::{CliDispatch, DoctorFormat, dispatch, parse_doctor_format, render_doctor};
    use crate::config::AppConfig;

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn no_args_or_run_starts_server() {
        assert!(matches!(dispatch(&[]), Ok(CliDispatch::Run)));
        assert!(matches!(dispatch(&args(&["run"])), Ok(CliDispatch::Run)));
    }

    #[test]
    fn unknown_command_is_error() {
        assert!(dispatch(&args(&["serve-forever"])).is_err());
    }

    #[test]
    fn doctor_format_parsing() {
        assert_eq!(parse_doctor_format(&[]).expect("default"), DoctorFormat::Text);
        assert_eq!(
            parse_doctor_format(&args(&["--format", "json"])).expect("json"),
            DoctorFormat::Json
        );
        assert!(parse_doctor_format(&args(&["--format", "yaml"])).is_err());
        assert!(parse_doctor_format(&args(&["json"])).is_err());
    }

    #[test]
    fn doctor_hides_secret() {
        let config = AppConfig::from_lookup(|key| match key {
            "AUTH_SECRET_KEY" => Some("doctor-secret".to_string()),
            _ => None,
        })
        .expect("config");
        let text = render_doctor(&config, DoctorFormat::Text);
        assert!(!text.contains("doctor-secret"));
        assert!(text.contains("secret-source: env"));

        let json: Value =
            serde_json::from_str(&render_doctor(&config, DoctorFormat::Json)).expect("json");
        assert_eq!(json["listenAddr"], "0.0.0.0:5050");
        assert_eq!(json["secretFingerprint"].as_str().map(str::len), Some(12));
    }
}
