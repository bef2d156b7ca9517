//! カード描画
//!
//! レコード → HTML断片の純粋関数。データ由来の文字列は属性値も含めて
//! すべて `escape_html` を通す。イベントは描画後にコンテナ側で委譲して
//! 付けるので、ボタンには `data-view` / `data-fav` だけを持たせる。

use crate::models::{Member, Place, Trail};

/// 詳細ボタンの属性名
pub const VIEW_ATTR: &str = "data-view";
/// お気に入りボタンの属性名
pub const FAV_ATTR: &str = "data-fav";

pub const SAVED_LABEL: &str = "★ Saved";
pub const SAVE_LABEL: &str = "☆ Save";

/// `& < > " '` を実体参照に置き換える
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(ch),
        }
    }
    out
}

/// `encodeURI` と同じ範囲だけエンコード（`:/?#&=` などの予約文字は残す）
pub fn encode_uri(uri: &str) -> String {
    let mut out = String::with_capacity(uri.len());
    let mut buf = [0u8; 4];
    for ch in uri.chars() {
        if ch.is_ascii_alphanumeric() || ";,/?:@&=+$-_.!~*'()#".contains(ch) {
            out.push(ch);
        } else {
            out.push_str(&urlencoding::encode(ch.encode_utf8(&mut buf)));
        }
    }
    out
}

pub fn fav_label(saved: bool) -> &'static str {
    if saved { SAVED_LABEL } else { SAVE_LABEL }
}

/// 一覧をつなげて1つのHTMLにする（コンテナへは丸ごと代入）
pub fn render_list<T, F>(items: &[T], card: F) -> String
where
    F: Fn(&T) -> String,
{
    items.iter().map(card).collect::<Vec<_>>().concat()
}

/// 代替メッセージ
pub fn message(class: &str, text: &str) -> String {
    format!(r#"<p class="{}">{}</p>"#, escape_html(class), escape_html(text))
}

// ============================================
// トレイル
// ============================================

fn safe_tag(trail: &Trail) -> &'static str {
    if trail.safe_route {
        r#"<span class="tag tag-safe">Safe Route</span>"#
    } else {
        ""
    }
}

pub fn trail_card(trail: &Trail, saved: bool) -> String {
    let name = escape_html(&trail.name);
    let image = trail
        .image
        .as_deref()
        .map(|img| {
            format!(
                r#"<img src="images/trails/{}" alt="{}" loading="lazy" width="600" height="400">"#,
                escape_html(&encode_uri(img)),
                name
            )
        })
        .unwrap_or_default();

    // idが無いレコードには操作ボタンを出さない
    let actions = trail
        .id
        .as_deref()
        .filter(|id| !id.is_empty())
        .map(|id| {
            let id = escape_html(id);
            format!(
                r#"<div class="card-actions"><button class="btn btn-primary" type="button" {view}="{id}">View details</button><button class="btn" type="button" {fav}="{id}">{label}</button></div>"#,
                view = VIEW_ATTR,
                fav = FAV_ATTR,
                id = id,
                label = fav_label(saved),
            )
        })
        .unwrap_or_default();

    format!(
        r#"<article class="card">{image}<div class="card-body"><h3 class="card-title">{name}</h3><p class="meta"><strong>Difficulty:</strong> {difficulty}</p><p class="meta"><strong>Distance:</strong> {distance} • <strong>Time:</strong> {time}</p>{safe}{actions}</div></article>"#,
        image = image,
        name = name,
        difficulty = escape_html(&trail.difficulty),
        distance = escape_html(&trail.distance_label()),
        time = escape_html(&trail.time_est),
        safe = safe_tag(trail),
        actions = actions,
    )
}

/// モーダルに入れる詳細
pub fn trail_detail(trail: &Trail) -> String {
    format!(
        r#"<div class="modal-body"><h2>{name}</h2><p class="meta"><strong>Difficulty:</strong> {difficulty}</p><p class="meta"><strong>Distance:</strong> {distance} • <strong>Time:</strong> {time}</p><p class="meta"><strong>Best season:</strong> {season}</p><p>{description}</p><p class="tag tag-safe">Safety tip: {tip}</p></div>"#,
        name = escape_html(&trail.name),
        difficulty = escape_html(&trail.difficulty),
        distance = escape_html(&trail.distance_label()),
        time = escape_html(&trail.time_est),
        season = escape_html(&trail.best_season),
        description = escape_html(&trail.description),
        tip = escape_html(&trail.safety_tip),
    )
}

/// 予約フォームの保存ルート選択肢（初期状態はチェック済み）
pub fn saved_route_option(trail: &Trail) -> String {
    let id = trail.id.as_deref().unwrap_or_default();
    let safe = if trail.safe_route {
        r#"<span class="tag tag-safe">Safe Route</span>"#
    } else {
        ""
    };
    format!(
        r#"<label class="field"><span class="saved-route-row"><input type="checkbox" class="saved-route" value="{id}" checked><span><strong>{name}</strong><span class="meta">{difficulty} • {distance} • {time}</span></span>{safe}</span></label>"#,
        id = escape_html(id),
        name = escape_html(&trail.name),
        difficulty = escape_html(&trail.difficulty),
        distance = escape_html(&trail.distance_label()),
        time = escape_html(&trail.time_est),
        safe = safe,
    )
}

// ============================================
// 会員
// ============================================

pub fn member_card(member: &Member) -> String {
    let name = escape_html(&member.name);
    let image = member
        .image
        .as_deref()
        .map(|img| {
            format!(
                r#"<img class="member-img" src="images/{}" alt="{} logo or storefront" loading="lazy">"#,
                escape_html(&encode_uri(img)),
                name
            )
        })
        .unwrap_or_default();
    let website = member
        .website
        .as_deref()
        .filter(|w| !w.is_empty())
        .map(|w| {
            format!(
                r#"<p class="member-meta"><strong>Website:</strong> <a class="member-link" href="{}" target="_blank" rel="noopener">Visit site</a></p>"#,
                escape_html(w)
            )
        })
        .unwrap_or_default();

    format!(
        r#"<article class="member-card">{image}<div class="member-body"><h2 class="member-name">{name}</h2><span class="member-level">{level}</span><p class="member-meta"><strong>Address:</strong> {address}</p><p class="member-meta"><strong>Phone:</strong> {phone}</p>{website}</div></article>"#,
        image = image,
        name = name,
        level = member.level().as_str().to_uppercase(),
        address = escape_html(&member.address),
        phone = escape_html(&member.phone),
        website = website,
    )
}

// ============================================
// 観光スポット
// ============================================

pub fn place_card(place: &Place) -> String {
    let title = escape_html(&place.title);
    let image = place
        .image
        .as_deref()
        .map(|img| {
            format!(
                r#"<img src="{}" alt="{}" loading="lazy" width="300" height="200">"#,
                escape_html(&encode_uri(img)),
                title
            )
        })
        .unwrap_or_default();
    let link = place
        .more_link
        .as_deref()
        .map(|href| {
            format!(
                r#"<a class="btn btn-primary" href="{}" target="_blank" rel="noopener">Learn more</a>"#,
                escape_html(href)
            )
        })
        .unwrap_or_default();

    format!(
        r#"<article class="discover-card"><h2>{title}</h2>{image}<address>{address}</address><p>{description}</p>{link}</article>"#,
        title = title,
        image = image,
        address = escape_html(&place.address),
        description = escape_html(&place.description),
        link = link,
    )
}

// ============================================
// サンクスページ・天気
// ============================================

/// 空欄を除いた `<dt>/<dd>` の組
pub fn summary_rows(rows: &[(&str, String)]) -> String {
    rows.iter()
        .filter(|(_, value)| !value.trim().is_empty())
        .map(|(label, value)| {
            format!("<div><dt>{}</dt><dd>{}</dd></div>", escape_html(label), escape_html(value))
        })
        .collect::<Vec<_>>()
        .concat()
}

/// `<li>` の列
pub fn list_items<S: AsRef<str>>(items: &[S]) -> String {
    items
        .iter()
        .map(|item| format!("<li>{}</li>", escape_html(item.as_ref())))
        .collect::<Vec<_>>()
        .concat()
}

/// `<li class="meta">` の1行メッセージ
pub fn list_message(text: &str) -> String {
    format!(r#"<li class="meta">{}</li>"#, escape_html(text))
}
