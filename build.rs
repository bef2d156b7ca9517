fn main() {
    // OpenWeatherMap のAPIキーはビルド時の環境変数から埋め込む
    match std::env::var("OPENWEATHER_API_KEY") {
        Ok(key) if !key.trim().is_empty() => {
            println!("cargo:warning=OPENWEATHER_API_KEY set ({} chars)", key.trim().len());
        }
        _ => {
            println!("cargo:warning=OPENWEATHER_API_KEY not set; weather widget needs inline site-config");
        }
    }

    // キー変更時に再ビルド
    println!("cargo:rerun-if-env-changed=OPENWEATHER_API_KEY");
}
