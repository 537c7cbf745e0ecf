//! Static help content.

/// Help modal body.
pub const HELP_HTML: &str = r#"
<h1>반가워! 청년들의 든든한 정책 선배, 청년이음 선배봇이야! 🌟🤖</h1>
<p>안녕, 후배님! 👋 여기까지 찾아오느라 고생 많았어.<br>
나는 <strong>주거, 일자리, 복지, 금융</strong> 등 복잡하고 어려운 청년 정책들을<br>
너에게 딱 맞춰서 알기 쉽게 설명해 주는 <strong>AI 정책 멘토</strong>야.</p>
<p>어떤 정보가 필요한지 말만 해! 방대한 정책 데이터 속에서 네 상황에 딱 맞는 꿀팁들만 쏙쏙 골라줄게. 😺</p>
<hr>
<h2>💡 나한테 이렇게 물어봐!</h2>
<p>막연하게 질문해도 괜찮지만, <strong>사는 곳</strong>이나 <strong>관심 분야</strong>를 함께 말해주면 더 정확하게 알려줄 수 있어!</p>
<h3>🏠 주거 &amp; 자취</h3>
<ul>
<li>"서울에서 자취 중인데 월세 지원 받을 수 있어?"</li>
<li>"대구 행복주택 입주 자격이 어떻게 돼?"</li>
<li>"전세 보증금 이자 지원 정책 좀 찾아줄래?"</li>
</ul>
<h3>💼 취업 &amp; 일자리</h3>
<ul>
<li>"경기도 취업 면접 수당 신청하고 싶어."</li>
<li>"미취업 청년을 위한 지원금 있을까?"</li>
<li>"내일배움카드 발급 방법 좀 알려줘."</li>
</ul>
<h3>🍀 복지 &amp; 금융</h3>
<ul>
<li>"청년도약계좌 가입 조건이 뭐야?"</li>
<li>"마음 건강 상담 받고 싶은데 지원 정책 있어?"</li>
<li>"학자금 대출 이자 지원 신청 기간 언제야?"</li>
</ul>
<hr>
<h2>📝 꿀팁 대방출!</h2>
<ol>
<li><strong>지역을 콕 집어줘!</strong> 🗺️<br>"그냥 지원금 줘" 대신 <strong>"인천 지원금 줘"</strong>라고 하면 더 정확해!</li>
<li><strong>구체적으로 물어봐!</strong> 🔍<br>너의 나이, 소득, 거주지 상황을 살짝 귀띔해주면 맞춤형 상담이 가능해.</li>
<li><strong>생각의 과정도 슬쩍 봐봐!</strong> 🧠<br>답변 아래에 있는 <strong>[🔍 선배봇의 생각 과정 보기]</strong>를 누르면, 내가 어떻게 자료를 찾았는지 보여줄게.</li>
</ol>
<p>자, 이제 시작해볼까? 궁금한 거 있으면 편하게 물어봐! 힘껏 도와줄게! 💪😊</p>
"#;

/// Reduce help markup to readable text for non-HTML front ends.
///
/// Block-level closing tags and `<br>` become line breaks, list items get a
/// bullet, and the `&amp;` entity is decoded.
#[must_use]
pub fn to_plain_text(html: &str) -> String {
    let mut out = String::new();
    let mut rest = html;

    while let Some(start) = rest.find('<') {
        out.push_str(&rest[..start]);
        let Some(end) = rest[start..].find('>') else {
            rest = &rest[start..];
            break;
        };
        let tag = &rest[start + 1..start + end];
        match tag.trim_start_matches('/').split_whitespace().next() {
            Some("p" | "li" | "h1" | "h2" | "h3" | "ul" | "ol") if tag.starts_with('/') => {
                out.push('\n');
            }
            Some("br") => out.push('\n'),
            Some("hr") => out.push_str("\n----\n"),
            Some("li") if !tag.starts_with('/') => out.push_str("• "),
            _ => {}
        }
        rest = &rest[start + end + 1..];
    }
    out.push_str(rest);

    out.replace("&amp;", "&")
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_conversion() {
        let text = to_plain_text("<h3>주거 &amp; 자취</h3><ul><li>하나</li><li>둘<br>셋</li></ul>");
        assert_eq!(text, "주거 & 자취\n• 하나\n• 둘\n셋");
    }

    #[test]
    fn test_help_mentions_examples() {
        let text = to_plain_text(HELP_HTML);
        assert!(text.starts_with("반가워!"));
        assert!(text.contains("• \"청년도약계좌 가입 조건이 뭐야?\""));
        assert!(!text.contains('<'));
    }
}
