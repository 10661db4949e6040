//! Prompt catalog for the Generation module.
//!
//! Document-type system prompts, the image positive-prompt template, the
//! universal negative prompt, and the default style catalogs. All entries
//! are process-wide constants — nothing here mutates after startup.
//! Per-call custom prompts override a catalog template wholesale; they are
//! never merged with it.

// ────────────────────────────────────────────────────────────────────────────
// Document types
// ────────────────────────────────────────────────────────────────────────────

/// The nine supported document types. Wire labels are the Korean strings
/// accepted by the HTTP API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocType {
    Award,
    Diary,
    Report,
    Document,
    Email,
    TypoCorrection,
    StyleRevision,
    BlogPost,
    AdCopy,
}

impl DocType {
    /// Every document type, in catalog order.
    pub const ALL: [DocType; 9] = [
        DocType::Award,
        DocType::Diary,
        DocType::Report,
        DocType::Document,
        DocType::Email,
        DocType::TypoCorrection,
        DocType::StyleRevision,
        DocType::BlogPost,
        DocType::AdCopy,
    ];

    /// Generation types — the ones the combined text+image endpoint accepts.
    pub const GENERATION: [DocType; 7] = [
        DocType::Award,
        DocType::Diary,
        DocType::Report,
        DocType::Document,
        DocType::Email,
        DocType::BlogPost,
        DocType::AdCopy,
    ];

    /// The wire label for this type.
    pub fn label(&self) -> &'static str {
        match self {
            DocType::Award => "상장",
            DocType::Diary => "일기",
            DocType::Report => "보고서",
            DocType::Document => "문서",
            DocType::Email => "메일작성",
            DocType::TypoCorrection => "오타수정",
            DocType::StyleRevision => "글수정",
            DocType::BlogPost => "블로그 글 작성",
            DocType::AdCopy => "광고 문구 생성",
        }
    }

    /// Parses a wire label. Returns `None` for unknown labels — the intake
    /// layer turns that into a validation error.
    pub fn from_label(label: &str) -> Option<DocType> {
        DocType::ALL.iter().copied().find(|d| d.label() == label)
    }

    /// Revision types rewrite caller-supplied text; generation types create
    /// new text from keywords.
    pub fn is_revision(&self) -> bool {
        matches!(self, DocType::TypoCorrection | DocType::StyleRevision)
    }

    /// The catalog system prompt for this type. Total over all variants.
    pub fn template(&self) -> &'static str {
        match self {
            DocType::Award => AWARD_PROMPT,
            DocType::Diary => DIARY_PROMPT,
            DocType::Report => REPORT_PROMPT,
            DocType::Document => DOCUMENT_PROMPT,
            DocType::Email => EMAIL_PROMPT,
            DocType::TypoCorrection => TYPO_CORRECTION_PROMPT,
            DocType::StyleRevision => STYLE_REVISION_PROMPT,
            DocType::BlogPost => BLOG_POST_PROMPT,
            DocType::AdCopy => AD_COPY_PROMPT,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// System prompt templates
// ────────────────────────────────────────────────────────────────────────────
//
// Each template fixes the output-format contract for its type: responses
// must use the `title : …` / `content : …` form, and several types carry
// length bounds for `content`. The bounds are prompt contract only — the
// backend's output is never rejected locally for violating them.

/// Award certificate. Content must stay under 150 characters.
pub const AWARD_PROMPT: &str = r#"당신은 '세상의 모든 칭찬과 용기를 담아 상장을 만드는 문구 전문가'입니다.
## 당신의 임무:
주어진 '키워드'와 '말투'를 조합하여, 받는 사람에게 용기, 자신감, 따뜻한 인정을 줄 수 있는 짧고 멋진 '상장' 문구를 생성합니다.
## 출력 규칙 (매우 중요):
1. 'content'는 반드시 150자 미만이어야 합니다.
2. 'title'과 'content'는 요청된 'Tone'을 완벽하게 반영해야 합니다.
3. 오직 'title : [제목]'과 'content : [내용]' 형식으로만 응답해야 합니다. 다른 설명은 금지합니다.
---
[입력]
Keywords: {keywords}
Tone: {writingStyle}
[출력]"#;

/// Diary entry. Content between 200 and 500 characters.
pub const DIARY_PROMPT: &str = r#"당신은 '감성적인 일기 작가'입니다.
## 당신의 임무:
주어진 '키워드'를 바탕으로 '말투'에 맞게 짧고 감성적인 일기 한 편을 작성합니다.
## 출력 규칙 (매우 중요):
1. 'title : [오늘의 제목]'과 'content : [일기 내용]' 형식으로만 응답해야 합니다. 다른 설명은 금지합니다.
2. content는 200자 이상 500자 미만이어야 합니다.
---
[입력]
Keywords: {keywords}
Tone: {writingStyle}
[출력]"#;

/// Business report outline. Content between 300 and 600 characters.
pub const REPORT_PROMPT: &str = r#"당신은 '핵심을 꿰뚫는 보고서 작성 전문가'입니다.
## 당신의 임무:
주어진 '키워드'를 바탕으로 '말투'에 맞게 간결한 비즈니스 보고서(개요)를 작성합니다.
## 출력 규칙 (매우 중요):
1. 'title : [보고서 제목]'과 'content : [보고서 핵심 내용]' 형식으로만 응답해야 합니다. 다른 설명은 금지합니다.
2. content는 300자 이상 600자 미만이어야 합니다.
---
[입력]
Keywords: {keywords}
Tone: {writingStyle}
[출력]"#;

/// General-purpose document. Content between 200 and 500 characters.
pub const DOCUMENT_PROMPT: &str = r#"당신은 '다재다능한 문서 작성가'입니다.
## 당신의 임무:
주어진 '키워드'와 '말투'를 바탕으로 요청된 일반 문서를 작성합니다.
## 출력 규칙 (매우 중요):
1. 'title : [문서 제목]'과 'content : [문서 내용]' 형식으로만 응답해야 합니다. 다른 설명은 금지합니다.
2. content는 200자 이상 500자 미만이어야 합니다.
---
[입력]
Keywords: {keywords}
Tone: {writingStyle}
[출력]"#;

/// Email draft. Title carries the subject line, content the body.
pub const EMAIL_PROMPT: &str = r#"당신은 '프로페셔널한 이메일 비서'입니다.
## 당신의 임무:
주어진 '키워드'와 '말투'를 조합하여, 격식과 상황에 맞는 완벽한 이메일 초안을 작성합니다.
## 출력 규칙 (매우 중요):
1. 'title'에는 이메일 제목을, 'content'에는 이메일 본문을 작성합니다.
2. 다른 설명은 절대 추가하지 마세요.
---
[입력]
Keywords: {keywords}
Tone: {writingStyle}
[출력]"#;

/// Typo correction — the only type that takes no writing style.
pub const TYPO_CORRECTION_PROMPT: &str = r#"당신은 '매우 꼼꼼한 교정 전문가'입니다.
## 당신의 임무:
주어진 '원본 텍스트'에서 맞춤법, 띄어쓰기, 문법 오류를 모두 찾아 수정하고, 완벽하게 교정된 텍스트를 반환합니다. 원본의 의미나 스타일은 절대 변경하지 마세요.
## 출력 규칙 (매우 중요):
1. 'title'에는 "교정 완료"라고만 적습니다.
2. 'content'에는 교정된 전체 텍스트만을 포함합니다.
3. 다른 설명은 절대 추가하지 마세요.
---
[입력]
Original Text: {originalText}
[출력]"#;

/// Style revision — rewrites the original text in the requested tone.
pub const STYLE_REVISION_PROMPT: &str = r#"당신은 '문맥을 파악하고 글을 다듬는 편집 전문가'입니다.
## 당신의 임무:
주어진 '원본 텍스트'와 '말투'를 참고하여, 문맥을 더 자연스럽고 세련되게 다듬습니다. 어색한 문장을 개선하고, 더 나은 표현을 제안하여 글의 전체적인 품질을 향상시킵니다.
## 출력 규칙 (매우 중요):
1. 'title'에는 수정된 글의 핵심 주제를 담은 새로운 제목을 제안합니다.
2. 'content'에는 수정된 전체 텍스트만을 포함합니다.
3. 다른 설명은 절대 추가하지 마세요.
---
[입력]
    Original Text: {originalText},
    Tone: {writingStyle}
[출력]"#;

/// Blog post with intro/body/conclusion structure.
pub const BLOG_POST_PROMPT: &str = r#"당신은 '매력적인 블로그 포스트 작가'입니다.
## 당신의 임무:
주어진 '키워드'를 핵심 주제로 삼고, '말투'에 맞춰 독자들의 흥미를 유발하고 읽기 쉬운 블로그 포스트를 작성합니다.
## 출력 규칙 (매우 중요):
1. 'title'에는 시선을 끄는 블로그 포스트 제목을, 'content'에는 서론, 본론, 결론의 구조를 갖춘 본문을 작성합니다.
2. 적절한 경우, 이모지나 소제목을 활용하여 가독성을 높입니다.
3. 다른 설명은 절대 추가하지 마세요.
---
[입력]
Keywords: {keywords}
Tone: {writingStyle}
[출력]"#;

/// Ad copy. Content under 100 characters.
pub const AD_COPY_PROMPT: &str = r#"당신은 '소비자의 마음을 사로잡는 카피라이터'입니다.
## 당신의 임무:
주어진 '키워드'를 제품이나 서비스의 핵심 장점으로 삼고, '말투'에 맞춰 짧고 강력한 광고 문구를 생성합니다.
## 출력 규칙 (매우 중요):
1. 'title'에는 슬로건 또는 헤드라인을, 'content'에는 구체적인 행동을 유도하는 짧은 광고 본문을 작성합니다.
2. 'content'는 100자 미만으로 간결해야 합니다.
3. 다른 설명은 절대 추가하지 마세요.
---
[입력]
Keywords: {keywords}
Tone: {writingStyle}
[출력]"#;

// ────────────────────────────────────────────────────────────────────────────
// Image prompts
// ────────────────────────────────────────────────────────────────────────────

/// Call-1 template: turns a generated title/content pair into a single
/// English positive-prompt scene description for the image model. The
/// template forbids any preamble and any negative-prompt section in the
/// model's answer.
pub const IMAGE_PROMPT_TEMPLATE: &str = r#"당신은 '상장 문구를 시각적으로 표현하는 이미지 생성 전문가'입니다.
당신의 유일한 임무는 제공된 정보를 바탕으로 **글자가 전혀 없는** 아름다운 배경 삽화를 생성하기 위한 **'영어 긍정 프롬프트(Positive Prompt)'**만을 생성하는 것입니다.
## 당신의 임무 상세:
1. 제공된 'Title', 'Content', 'Keywords' (한국어)를 읽고, 그 안에 담긴 핵심 주제, 감성, 상징적인 의미를 파악합니다.
2. 지정된 'Image Style'을 확인합니다.
3. 이 모든 정보를 조합하여, **'영어 긍정 프롬프트 생성 규칙'**에 따라 비유적이고 상징적인 영어 장면 묘사(Positive Prompt) **단 하나만**을 출력합니다.
4. 다른 설명, 인사, 'Negative Prompt:' 등의 내용은 절대 출력하지 마세요.
## 영어 긍정 프롬프트 (Positive Prompt) 생성 규칙:
* 'Title'과 'Content'의 의미를 **비유적이고 상징적인 시각적 장면**으로 묘사합니다.
* **예시:** "에너자이저 상" -> "A vibrant, glowing battery icon charging a cute, sleepy cartoon character..."
* **예시:** "중원의 지휘자 상" -> "A minimalist 3D rendering of a small, powerful figure..."
---
[실제 입력 시작]
## 입력 정보:
1. Title: {title}
2. Content: {content}
3. Keywords: {keywords}
4. Image Style: {imageStyle}
## 출력 (영어 긍정 프롬프트만 생성):"#;

/// Universal negative prompt appended to every Call-2 image request.
/// Instructs the image model to render no textual glyphs in any script.
pub const NEGATIVE_PROMPT: &str = "text, ANY text, ALL text, words, letters, font, typeface, writing, caption, subtitle, signage, logo, signature, watermark, label, title, heading, paragraph, characters, alphabet, numbers, digits, numerals, glyphs, typography, Korean text, Korean characters, Hangul, 한글, Chinese characters, Japanese characters, kanji, hiragana, katakana, Latin letters, English text, foreign characters, Asian characters, broken text, garbled text, illegible text, distorted letters, partial text, any form of readable text, any form of unreadable text, speech bubble, thought bubble, comic strip, manuscript, symbols, DO NOT INCLUDE ANY TEXT WHATSOEVER";

// ────────────────────────────────────────────────────────────────────────────
// Default style catalogs
// ────────────────────────────────────────────────────────────────────────────

/// A selectable style: `label` for display, `value` injected into prompts.
#[derive(Debug, Clone, Copy, serde::Serialize)]
pub struct StyleOption {
    pub label: &'static str,
    pub value: &'static str,
}

pub const DEFAULT_IMAGE_STYLES: &[StyleOption] = &[
    StyleOption { label: "수채화", value: "수채화 (Watercolor)" },
    StyleOption { label: "수묵화", value: "수묵화 (Ink Painting)" },
    StyleOption { label: "지브리풍", value: "지브리풍 (Ghibli Style)" },
    StyleOption { label: "코믹툰", value: "코믹툰 (Comic Art)" },
    StyleOption { label: "스케치", value: "스케치 (Sketch)" },
    StyleOption { label: "3D 렌더링", value: "3D 렌더링 (3D Render)" },
];

pub const DEFAULT_WRITING_STYLES: &[StyleOption] = &[
    StyleOption { label: "근엄하게", value: "근엄하게" },
    StyleOption { label: "귀엽게", value: "귀엽게" },
    StyleOption { label: "보고서형태", value: "보고서 형태" },
    StyleOption { label: "영어로 작성", value: "영어로 작성" },
    StyleOption { label: "유쾌/재미", value: "유쾌/재미" },
    StyleOption { label: "감동/진지", value: "감동/진지" },
    StyleOption { label: "전문적으로", value: "전문적으로" },
    StyleOption { label: "간결하게", value: "간결하게" },
    StyleOption { label: "설득적으로", value: "설득적으로" },
    StyleOption { label: "시적으로", value: "시적으로" },
    StyleOption { label: "SNS 스타일", value: "SNS 스타일" },
    StyleOption { label: "학술적으로", value: "학술적으로" },
];

// ────────────────────────────────────────────────────────────────────────────
// Prompt inputs & substitution
// ────────────────────────────────────────────────────────────────────────────

/// Variables injected into a document template, tagged by doc-type category
/// so keywords and original text can never be supplied together.
#[derive(Debug, Clone)]
pub enum PromptInputs {
    /// Generation types: keywords plus a mandatory writing style.
    Generation {
        keywords: String,
        writing_style: String,
    },
    /// Revision types: original text; the writing style is absent only for
    /// typo correction.
    Revision {
        original_text: String,
        writing_style: Option<String>,
    },
}

impl PromptInputs {
    /// The substitution pairs for this input set. A placeholder whose name
    /// is not produced here stays verbatim in the prompt.
    pub fn variables(&self) -> Vec<(&'static str, &str)> {
        match self {
            PromptInputs::Generation {
                keywords,
                writing_style,
            } => vec![("writingStyle", writing_style), ("keywords", keywords)],
            PromptInputs::Revision {
                original_text,
                writing_style,
            } => {
                let mut vars: Vec<(&'static str, &str)> = Vec::new();
                if let Some(style) = writing_style {
                    vars.push(("writingStyle", style));
                }
                vars.push(("originalText", original_text));
                vars
            }
        }
    }
}

/// Replaces every `{name}` occurrence for each supplied variable, one pass
/// per name in the given order. Names absent from `variables` are left
/// untouched; no escaping mechanism exists.
pub fn replace_prompt_variables(template: &str, variables: &[(&str, &str)]) -> String {
    let mut result = template.to_string();
    for (name, value) in variables {
        result = result.replace(&format!("{{{name}}}"), value);
    }
    result
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_doc_type_has_a_nonempty_template() {
        for doc_type in DocType::ALL {
            assert!(
                !doc_type.template().trim().is_empty(),
                "empty template for {doc_type:?}"
            );
        }
    }

    #[test]
    fn test_generation_templates_carry_keywords_and_style_placeholders() {
        for doc_type in DocType::GENERATION {
            let template = doc_type.template();
            assert!(
                template.contains("{keywords}"),
                "{doc_type:?} missing {{keywords}}"
            );
            assert!(
                template.contains("{writingStyle}"),
                "{doc_type:?} missing {{writingStyle}}"
            );
        }
    }

    #[test]
    fn test_revision_templates_carry_original_text_placeholder() {
        for doc_type in [DocType::TypoCorrection, DocType::StyleRevision] {
            assert!(doc_type.template().contains("{originalText}"));
        }
    }

    #[test]
    fn test_typo_correction_is_the_only_template_without_style() {
        assert!(!DocType::TypoCorrection.template().contains("{writingStyle}"));
        assert!(DocType::StyleRevision.template().contains("{writingStyle}"));
    }

    #[test]
    fn test_templates_assert_length_contracts() {
        assert!(DocType::Award.template().contains("150자 미만"));
        assert!(DocType::Diary.template().contains("200자 이상 500자 미만"));
        assert!(DocType::Report.template().contains("300자 이상 600자 미만"));
        assert!(DocType::Document.template().contains("200자 이상 500자 미만"));
        assert!(DocType::AdCopy.template().contains("100자 미만"));
    }

    #[test]
    fn test_templates_assert_title_content_output_format() {
        for doc_type in DocType::ALL {
            let template = doc_type.template();
            assert!(template.contains("title"), "{doc_type:?} format contract");
            assert!(template.contains("content"), "{doc_type:?} format contract");
        }
    }

    #[test]
    fn test_image_template_carries_all_four_placeholders() {
        for placeholder in ["{title}", "{content}", "{keywords}", "{imageStyle}"] {
            assert!(IMAGE_PROMPT_TEMPLATE.contains(placeholder));
        }
    }

    #[test]
    fn test_image_template_forbids_negative_prompt_section() {
        assert!(IMAGE_PROMPT_TEMPLATE.contains("'Negative Prompt:'"));
    }

    #[test]
    fn test_negative_prompt_forbids_text_in_every_script() {
        for term in [
            "Hangul",
            "한글",
            "kanji",
            "hiragana",
            "katakana",
            "Latin letters",
            "watermark",
        ] {
            assert!(NEGATIVE_PROMPT.contains(term), "missing term: {term}");
        }
    }

    #[test]
    fn test_doc_type_label_round_trip() {
        for doc_type in DocType::ALL {
            assert_eq!(DocType::from_label(doc_type.label()), Some(doc_type));
        }
        assert_eq!(DocType::from_label("소설"), None);
    }

    #[test]
    fn test_revision_split() {
        assert!(DocType::TypoCorrection.is_revision());
        assert!(DocType::StyleRevision.is_revision());
        for doc_type in DocType::GENERATION {
            assert!(!doc_type.is_revision());
        }
    }

    #[test]
    fn test_default_style_catalogs_have_expected_sizes() {
        assert_eq!(DEFAULT_IMAGE_STYLES.len(), 6);
        assert_eq!(DEFAULT_WRITING_STYLES.len(), 12);
    }

    #[test]
    fn test_substitute_basic() {
        let result = replace_prompt_variables("title: {title}", &[("title", "X")]);
        assert_eq!(result, "title: X");
    }

    #[test]
    fn test_substitute_is_identity_without_matching_names() {
        let template = "Keywords: {keywords}";
        let result = replace_prompt_variables(template, &[("writingStyle", "근엄하게")]);
        assert_eq!(result, template);
    }

    #[test]
    fn test_substitute_replaces_every_occurrence() {
        let result = replace_prompt_variables("{x} and {x}", &[("x", "y")]);
        assert_eq!(result, "y and y");
    }

    #[test]
    fn test_substitute_applies_names_in_slice_order() {
        let result = replace_prompt_variables("{a} {b}", &[("a", "first"), ("b", "second")]);
        assert_eq!(result, "first second");
    }

    #[test]
    fn test_generation_inputs_variables() {
        let inputs = PromptInputs::Generation {
            keywords: "#고마워".to_string(),
            writing_style: "근엄하게".to_string(),
        };
        assert_eq!(
            inputs.variables(),
            vec![("writingStyle", "근엄하게"), ("keywords", "#고마워")]
        );
    }

    #[test]
    fn test_revision_inputs_omit_style_when_absent() {
        let inputs = PromptInputs::Revision {
            original_text: "안뇽하세요".to_string(),
            writing_style: None,
        };
        assert_eq!(inputs.variables(), vec![("originalText", "안뇽하세요")]);
    }
}
