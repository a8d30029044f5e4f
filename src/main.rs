use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use i18n_translate::config::parse_lang_list;
use i18n_translate::utils::logging;
use i18n_translate::{App, Config, OllamaTranslator, TranslationPort};
use std::sync::Arc;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "i18n-translate", version, about = "使用 Ollama 批量翻译 JSON / YAML 翻译文件")]
struct Cli {
    /// 显示详细日志
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// 翻译匹配的全部文件
    Translate {
        /// 文件匹配模式，例如 "./translations/*.json"
        #[arg(short, long)]
        pattern: String,
        /// 目标语言，逗号分隔
        #[arg(short, long)]
        langs: Option<String>,
        /// 源语言
        #[arg(short, long)]
        source: Option<String>,
        /// 输出目录
        #[arg(short, long)]
        output: Option<String>,
    },
    /// 检查配置和 Ollama 连接
    Check,
    /// 翻译一段文本做快速测试
    Test {
        /// 待翻译文本
        #[arg(short, long)]
        text: String,
        /// 源语言
        #[arg(short, long)]
        from: Option<String>,
        /// 目标语言
        #[arg(long, default_value = "en")]
        to: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // 加载 .env（不存在时忽略）
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    let mut config = Config::from_env();
    config.verbose_logging |= cli.verbose;

    // 初始化日志
    logging::init(config.verbose_logging);

    let result = match cli.command {
        Commands::Translate {
            pattern,
            langs,
            source,
            output,
        } => {
            if let Some(langs) = langs {
                config.target_langs = parse_lang_list(&langs);
            }
            if let Some(source) = source {
                config.source_lang = source;
            }
            if let Some(output) = output {
                config.output_dir = output;
            }
            run_translate(config, &pattern).await
        }
        Commands::Check => run_check(config).await,
        Commands::Test { text, from, to } => {
            if let Some(from) = from {
                config.source_lang = from;
            }
            run_test(config, &text, &to).await
        }
    };

    if let Err(e) = &result {
        error!("❌ {:#}", e);
    }
    result
}

async fn run_translate(config: Config, pattern: &str) -> Result<()> {
    let port: Arc<dyn TranslationPort> = Arc::new(OllamaTranslator::new(&config));
    let target_langs = config.target_langs.clone();

    let app = App::initialize(config, port).await.context("初始化失败")?;
    app.run(pattern, &target_langs).await.context("翻译失败")?;

    info!("✅ 翻译完成！");
    Ok(())
}

async fn run_check(config: Config) -> Result<()> {
    config.validate().context("配置错误")?;
    info!("✓ 配置有效");

    let translator = OllamaTranslator::new(&config);
    if translator.is_available().await {
        info!("✓ Ollama 已连接，模型: {}", config.model);
    } else {
        error!("❌ 无法连接到 Ollama 或模型未安装");
        info!("请确认 Ollama 已启动并已下载模型: {}", config.model);
    }

    info!("🔧 当前配置:");
    info!("   Ollama 地址: {}", translator.host());
    info!("   模型: {}", config.model);
    info!("   源语言: {}", config.source_lang);
    info!("   目标语言: {}", config.target_langs.join(", "));
    info!("   最大并发数: {}", config.max_concurrent_requests);
    info!("   超时: {}ms", config.timeout_ms);
    info!("   输出目录: {}", config.output_dir);

    Ok(())
}

async fn run_test(config: Config, text: &str, to: &str) -> Result<()> {
    let port: Arc<dyn TranslationPort> = Arc::new(OllamaTranslator::new(&config));
    let from = config.source_lang.clone();

    let app = App::initialize(config, port).await.context("初始化失败")?;
    let response = app
        .translate_text(text, &from, to)
        .await
        .context("翻译失败")?;

    info!("📝 结果:");
    info!("   原文 ({}): \"{}\"", from, text);
    info!("   译文 ({}): \"{}\"", to, response.translated_text);
    info!("   模型: {}", response.model);

    Ok(())
}
