use thiserror::Error;

/// 配置驗證錯誤
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("缺少必要配置項: {0}")]
    MissingField(String),

    #[error("無效的配置值: {0}")]
    InvalidValue(String),

    #[error("配置範圍錯誤: {field} 的值 {value} 不在範圍 {min}..{max} 內")]
    RangeError {
        field: String,
        value: String,
        min: String,
        max: String,
    },
}

/// 配置驗證器trait
pub trait Validator {
    /// 驗證配置
    fn validate(&self) -> Result<(), ValidationError>;
}

/// 驗證工具函數
pub struct ValidationUtils;

impl ValidationUtils {
    /// 驗證配置值是否在指定範圍內
    pub fn in_range<T>(
        value: T,
        min: T,
        max: T,
        field_name: &str
    ) -> Result<(), ValidationError>
    where
        T: PartialOrd + ToString
    {
        if value < min || value > max {
            return Err(ValidationError::RangeError {
                field: field_name.to_string(),
                value: value.to_string(),
                min: min.to_string(),
                max: max.to_string(),
            });
        }
        Ok(())
    }

    /// 驗證一個選項是否為某些值中的一個
    pub fn one_of<T>(
        value: &T,
        options: &[T],
        field_name: &str
    ) -> Result<(), ValidationError>
    where
        T: PartialEq + ToString
    {
        if !options.contains(value) {
            return Err(ValidationError::InvalidValue(format!(
                "{} 的值 {} 不是有效選項: {:?}",
                field_name,
                value.to_string(),
                options.iter().map(ToString::to_string).collect::<Vec<_>>()
            )));
        }
        Ok(())
    }

    /// 檢查必要的字串欄位是否有值
    pub fn not_empty(
        value: &str,
        field_name: &str
    ) -> Result<(), ValidationError> {
        if value.trim().is_empty() {
            return Err(ValidationError::MissingField(field_name.to_string()));
        }
        Ok(())
    }

    /// 檢查 URL 是否使用允許的協定
    pub fn has_scheme(
        value: &str,
        schemes: &[&str],
        field_name: &str
    ) -> Result<(), ValidationError> {
        Self::not_empty(value, field_name)?;
        let matched = schemes
            .iter()
            .any(|scheme| value.starts_with(&format!("{}://", scheme)));
        if !matched {
            return Err(ValidationError::InvalidValue(format!(
                "{} 必須以 {:?} 協定開頭: {}",
                field_name, schemes, value
            )));
        }
        Ok(())
    }
}
