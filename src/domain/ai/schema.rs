//! 플로우 출력 스키마
//!
//! 모델이 반환해야 하는 JSON의 형태를 데이터로 기술합니다. 스키마 하나가 두 가지 일을 합니다.
//! - 프롬프트에 삽입할 필드 목록(이름, 타입, 개수 제한, 작성 지침)을 렌더링
//! - 모델 응답 JSON이 스키마를 정확히 만족하는지 검사
//!
//! 검사를 통과한 값만 타입이 있는 결과로 변환되므로, 호출자에게 도달한 결과는
//! 항상 스키마를 온전히 만족합니다.

use serde_json::Value;

/// 출력 필드의 타입
#[derive(Debug, Clone)]
pub enum FieldKind {
    /// 자유 텍스트
    Text,
    /// 문자열 배열 (요소 개수 상/하한 포함)
    TextArray {
        min_items: Option<usize>,
        max_items: Option<usize>,
    },
    /// 중첩 객체의 배열
    ObjectArray {
        item_fields: Vec<FieldSpec>,
        min_items: Option<usize>,
        max_items: Option<usize>,
    },
}

/// 출력 필드 하나의 명세
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    /// 모델에게 주는 필드별 작성 지침
    pub guidance: &'static str,
}

impl FieldSpec {
    pub fn text(name: &'static str, guidance: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::Text,
            required: true,
            guidance,
        }
    }

    pub fn text_array(
        name: &'static str,
        min_items: Option<usize>,
        max_items: Option<usize>,
        guidance: &'static str,
    ) -> Self {
        Self {
            name,
            kind: FieldKind::TextArray {
                min_items,
                max_items,
            },
            required: true,
            guidance,
        }
    }

    pub fn object_array(
        name: &'static str,
        item_fields: Vec<FieldSpec>,
        min_items: Option<usize>,
        max_items: Option<usize>,
        guidance: &'static str,
    ) -> Self {
        Self {
            name,
            kind: FieldKind::ObjectArray {
                item_fields,
                min_items,
                max_items,
            },
            required: true,
            guidance,
        }
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// 프롬프트용 타입 표기
    fn type_label(&self) -> String {
        match &self.kind {
            FieldKind::Text => "string".to_string(),
            FieldKind::TextArray {
                min_items,
                max_items,
            } => match (min_items, max_items) {
                (Some(min), Some(max)) => format!("array of {} to {} strings", min, max),
                (Some(min), None) => format!("array of at least {} strings", min),
                (None, Some(max)) => format!("array of at most {} strings", max),
                (None, None) => "array of strings".to_string(),
            },
            FieldKind::ObjectArray {
                min_items,
                max_items,
                ..
            } => match (min_items, max_items) {
                (Some(min), Some(max)) => format!("array of {} to {} objects", min, max),
                (Some(min), None) => format!("array of at least {} objects", min),
                (None, Some(max)) => format!("array of at most {} objects", max),
                (None, None) => "array of objects".to_string(),
            },
        }
    }
}

/// 플로우 하나의 출력 스키마
#[derive(Debug, Clone)]
pub struct OutputSchema {
    fields: Vec<FieldSpec>,
}

impl OutputSchema {
    pub fn new(fields: Vec<FieldSpec>) -> Self {
        Self { fields }
    }

    /// 시스템 프롬프트에 덧붙일 출력 형식 지시문을 렌더링합니다.
    ///
    /// 같은 스키마는 항상 같은 문자열을 만듭니다.
    pub fn render_instructions(&self) -> String {
        let mut out = String::from(
            "## Output format\n\n\
             Respond with a single JSON object and nothing else - no prose before or \
             after it, no code fences. The object has these fields:\n",
        );

        for (index, field) in self.fields.iter().enumerate() {
            let requirement = if field.required { "required" } else { "optional" };
            out.push_str(&format!(
                "{}. \"{}\" ({}, {}): {}\n",
                index + 1,
                field.name,
                field.type_label(),
                requirement,
                field.guidance
            ));
            if let FieldKind::ObjectArray { item_fields, .. } = &field.kind {
                for item in item_fields {
                    let item_requirement = if item.required { "required" } else { "optional" };
                    out.push_str(&format!(
                        "   - each object has \"{}\" ({}, {}): {}\n",
                        item.name,
                        item.type_label(),
                        item_requirement,
                        item.guidance
                    ));
                }
            }
        }

        out.push_str(
            "\nEvery required field must be present. \
             The output must strictly conform to this structure.",
        );
        out
    }

    /// 파싱된 모델 응답이 스키마를 만족하는지 검사합니다.
    ///
    /// 위반 시 필드명과 위반 내용을 담은 설명을 반환합니다. 이 설명은 진단 로그 전용이며
    /// 사용자에게 노출되지 않습니다.
    pub fn conform(&self, value: &Value) -> Result<(), String> {
        let object = value
            .as_object()
            .ok_or_else(|| "output is not a JSON object".to_string())?;

        for field in &self.fields {
            let entry = object.get(field.name).filter(|v| !v.is_null());
            let Some(entry) = entry else {
                if field.required {
                    return Err(format!("required field '{}' is missing", field.name));
                }
                continue;
            };

            check_field(field, entry)?;
        }

        Ok(())
    }
}

fn check_field(field: &FieldSpec, value: &Value) -> Result<(), String> {
    match &field.kind {
        FieldKind::Text => {
            if !value.is_string() {
                return Err(format!("field '{}' must be a string", field.name));
            }
        }
        FieldKind::TextArray {
            min_items,
            max_items,
        } => {
            let items = value
                .as_array()
                .ok_or_else(|| format!("field '{}' must be an array", field.name))?;
            check_bounds(field.name, items.len(), *min_items, *max_items)?;
            if items.iter().any(|item| !item.is_string()) {
                return Err(format!(
                    "field '{}' must contain only strings",
                    field.name
                ));
            }
        }
        FieldKind::ObjectArray {
            item_fields,
            min_items,
            max_items,
        } => {
            let items = value
                .as_array()
                .ok_or_else(|| format!("field '{}' must be an array", field.name))?;
            check_bounds(field.name, items.len(), *min_items, *max_items)?;
            for item in items {
                let object = item.as_object().ok_or_else(|| {
                    format!("field '{}' must contain only objects", field.name)
                })?;
                for item_field in item_fields {
                    let entry = object.get(item_field.name).filter(|v| !v.is_null());
                    let Some(entry) = entry else {
                        if item_field.required {
                            return Err(format!(
                                "field '{}' items are missing '{}'",
                                field.name, item_field.name
                            ));
                        }
                        continue;
                    };
                    check_field(item_field, entry)?;
                }
            }
        }
    }
    Ok(())
}

fn check_bounds(
    name: &str,
    count: usize,
    min_items: Option<usize>,
    max_items: Option<usize>,
) -> Result<(), String> {
    if let Some(min) = min_items {
        if count < min {
            return Err(format!(
                "field '{}' has {} items, at least {} required",
                name, count, min
            ));
        }
    }
    if let Some(max) = max_items {
        if count > max {
            return Err(format!(
                "field '{}' has {} items, at most {} allowed",
                name, count, max
            ));
        }
    }
    Ok(())
}
