//! 模型模式（字段注册表）
//!
//! 模型定义时收集字段模板，按继承顺序合并，生成不可变的有序注册表

use crate::error::ModelResult;
use crate::model::field::Field;
use crate::model::field_map::FieldMap;
use crate::model::field_types::FieldDefinition;
use rat_logger::debug;
use std::sync::Arc;

/// 模型模式：有序、不可变的字段模板集合
#[derive(Debug)]
pub struct ModelSchema {
    name: String,
    bases: Vec<String>,
    /// 继承线性化顺序（C3），不含自身
    ancestors: Vec<Arc<ModelSchema>>,
    /// 自身声明的字段名
    declared: Vec<String>,
    fields: Vec<(String, Arc<FieldDefinition>)>,
}

impl ModelSchema {
    /// 创建模式构建器
    pub fn builder(name: &str) -> ModelSchemaBuilder {
        ModelSchemaBuilder::new(name)
    }

    /// 模型名称
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 基类模型名称（按声明顺序）
    pub fn bases(&self) -> &[String] {
        &self.bases
    }

    /// 字段解析顺序：自身在前，随后是 C3 线性化后的祖先模型
    pub fn mro(&self) -> Vec<&str> {
        std::iter::once(self.name.as_str())
            .chain(self.ancestors.iter().map(|ancestor| ancestor.name()))
            .collect()
    }

    /// 字段是否由该模型自身声明（而非继承）
    pub fn declares(&self, name: &str) -> bool {
        self.declared.iter().any(|declared| declared == name)
    }

    /// 按注册顺序遍历字段模板
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Arc<FieldDefinition>)> {
        self.fields.iter().map(|(name, def)| (name.as_str(), def))
    }

    /// 按注册顺序返回字段名
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// 获取字段模板
    pub fn get(&self, name: &str) -> Option<&Arc<FieldDefinition>> {
        self.fields
            .iter()
            .find(|(field_name, _)| field_name == name)
            .map(|(_, def)| def)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// 为新的模型实例复制一份未填充的字段集合
    pub fn instantiate(&self) -> FieldMap {
        FieldMap::new(
            &self.name,
            self.fields
                .iter()
                .map(|(name, def)| (name.clone(), Field::from_template(name, def.clone())))
                .collect(),
        )
    }
}

/// 模型模式构建器
#[derive(Debug)]
pub struct ModelSchemaBuilder {
    name: String,
    bases: Vec<Arc<ModelSchema>>,
    fields: Vec<(String, FieldDefinition)>,
}

impl ModelSchemaBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            bases: Vec::new(),
            fields: Vec::new(),
        }
    }

    /// 继承基类模型的字段；多次调用时按调用顺序合并
    pub fn extends(mut self, base: Arc<ModelSchema>) -> Self {
        self.bases.push(base);
        self
    }

    /// 声明字段
    pub fn field(mut self, name: &str, definition: FieldDefinition) -> Self {
        self.fields.push((name.to_string(), definition));
        self
    }

    /// 收集字段，生成模式
    ///
    /// 基类字段在前，位置按基类声明顺序展开；同名字段取继承线性化顺序中
    /// 第一个自身声明它的模型的模板。自身声明的字段追加在后，与已有字段同名时原位替换
    pub fn build(self) -> ModelResult<ModelSchema> {
        if self.name.trim().is_empty() {
            return Err(crate::model_error!(schema, "模型名称不能为空"));
        }

        let ancestors = linearize(&self.name, &self.bases)?;
        let mut collected: Vec<(String, Arc<FieldDefinition>)> = Vec::new();

        for base in &self.bases {
            for (name, definition) in base.fields() {
                if collected.iter().any(|(existing, _)| existing == name) {
                    continue;
                }
                let resolved = ancestors
                    .iter()
                    .find(|ancestor| ancestor.declares(name))
                    .and_then(|ancestor| {
                        debug!("模型 {} 的字段 {} 取自 {}", self.name, name, ancestor.name());
                        ancestor.get(name)
                    })
                    .unwrap_or(definition);
                collected.push((name.to_string(), resolved.clone()));
            }
        }

        let mut declared = Vec::with_capacity(self.fields.len());

        for (name, definition) in self.fields {
            if name.trim().is_empty() {
                return Err(crate::model_error!(
                    schema,
                    format!("模型 {} 中存在空的字段名", self.name)
                ));
            }

            if !declared.contains(&name) {
                declared.push(name.clone());
            }
            let definition = Arc::new(definition);
            match collected.iter_mut().find(|(existing, _)| *existing == name) {
                Some(slot) => {
                    debug!("模型 {} 覆盖字段: {}", self.name, name);
                    slot.1 = definition;
                }
                None => collected.push((name, definition)),
            }
        }

        let bases = self.bases.iter().map(|base| base.name().to_string()).collect();
        debug!("模型 {} 字段收集完成，共 {} 个字段", self.name, collected.len());

        Ok(ModelSchema {
            name: self.name,
            bases,
            ancestors,
            declared,
            fields: collected,
        })
    }
}

/// C3 线性化：合并各基类的线性化序列与基类列表本身
///
/// 共同祖先排在它的所有子类之后；无法得到一致顺序时返回 `SchemaError`
fn linearize(name: &str, bases: &[Arc<ModelSchema>]) -> ModelResult<Vec<Arc<ModelSchema>>> {
    let mut sequences: Vec<Vec<Arc<ModelSchema>>> = bases
        .iter()
        .map(|base| {
            std::iter::once(base.clone())
                .chain(base.ancestors.iter().cloned())
                .collect()
        })
        .collect();
    sequences.push(bases.to_vec());

    let mut result: Vec<Arc<ModelSchema>> = Vec::new();
    loop {
        sequences.retain(|sequence| !sequence.is_empty());
        if sequences.is_empty() {
            return Ok(result);
        }

        let candidate = sequences
            .iter()
            .map(|sequence| &sequence[0])
            .find(|head| {
                !sequences
                    .iter()
                    .any(|sequence| sequence[1..].iter().any(|other| Arc::ptr_eq(other, head)))
            })
            .cloned();

        let Some(candidate) = candidate else {
            return Err(crate::model_error!(
                schema,
                format!("无法为模型 {} 确定一致的继承顺序", name)
            ));
        };

        for sequence in sequences.iter_mut() {
            if Arc::ptr_eq(&sequence[0], &candidate) {
                sequence.remove(0);
            }
        }
        result.push(candidate);
    }
}
