// ==========================================
// 助教聘任管理系统 - 导入/导出服务
// ==========================================
// 职责: 对外的异步边界，整合导入流程
// 流程: 读取快照 → 规范化/校验/对账 → 构造写入集合 → 整批提交
// 红线: 对账完整结束之前不发起任何写入；预览路径从不写入
// ==========================================

use crate::config::{ImportConfig, ImportConfigReader};
use crate::domain::types::EntityKind;
use crate::export::{export_file_name, to_csv_bytes, to_json, to_json_bytes};
use crate::export::{ExportFile, ExportFormat, SpreadsheetFormatter};
use crate::importer::error::ImportResult;
use crate::importer::normalizer::ImportPayload;
use crate::reconcile::diff::{upsert_set, DiffSummary};
use crate::reconcile::pipeline::{export_minimal, prepare_import, DiffSpecs, ImportableEntity};
use crate::repository::ImportRepository;
use chrono::NaiveDate;
use serde::Serialize;
use std::time::Instant;
use tracing::{info, instrument, Span};
use uuid::Uuid;

// ==========================================
// ImportReport - 导入结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportReport {
    pub batch_id: String,
    pub entity: EntityKind,
    pub summary: DiffSummary,
    pub written: usize,
    pub elapsed_ms: u64,
}

// ==========================================
// ImportService
// ==========================================
pub struct ImportService<R, C>
where
    R: ImportRepository,
    C: ImportConfigReader,
{
    // 数据访问层
    repo: R,

    // 配置读取器
    config: C,
}

impl<R, C> ImportService<R, C>
where
    R: ImportRepository,
    C: ImportConfigReader,
{
    /// 创建服务实例
    ///
    /// # 参数
    /// - repo: 导入数据仓储
    /// - config: 配置读取器（每次调用时解析一次快照）
    pub fn new(repo: R, config: C) -> Self {
        Self { repo, config }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    fn resolve_config(&self) -> ImportResult<ImportConfig> {
        ImportConfig::from_reader(&self.config)
    }

    /// 预览导入（不写入）
    ///
    /// # 返回
    /// - Ok(DiffSpecs): 与输入记录一一对应的对账结果
    #[instrument(skip(self, payload), fields(entity = T::ENTITY.as_str()))]
    pub async fn preview<T: ImportableEntity>(
        &self,
        payload: &ImportPayload,
    ) -> ImportResult<DiffSpecs<T>> {
        let config = self.resolve_config()?;
        let snapshot = self.repo.load_snapshot().await?;
        prepare_import::<T>(payload, &snapshot, &config)
    }

    /// 导入并提交
    ///
    /// # 返回
    /// - Ok(ImportReport): 对账统计 + 实际写入条数
    /// - Err: 规范化/校验/引用解析/持久化任一环节失败（此时未写入任何记录）
    #[instrument(skip(self, payload), fields(entity = T::ENTITY.as_str(), batch_id))]
    pub async fn import<T: ImportableEntity>(
        &self,
        payload: &ImportPayload,
    ) -> ImportResult<ImportReport> {
        let start_time = Instant::now();
        let batch_id = Uuid::new_v4().to_string();
        Span::current().record("batch_id", batch_id.as_str());
        info!(
            batch_id = %batch_id,
            file_type = payload.file_type(),
            "开始导入"
        );

        let config = self.resolve_config()?;
        let snapshot = self.repo.load_snapshot().await?;

        let specs = prepare_import::<T>(payload, &snapshot, &config)?;
        let summary = DiffSummary::from_specs(&specs);
        let shapes = upsert_set::<T>(&specs, &snapshot.context())?;

        let written = if shapes.is_empty() {
            info!("无变更，跳过写入");
            0
        } else {
            self.repo.commit(T::into_batch(shapes)).await?
        };

        let report = ImportReport {
            batch_id,
            entity: T::ENTITY,
            summary,
            written,
            elapsed_ms: start_time.elapsed().as_millis() as u64,
        };
        info!(
            batch_id = %report.batch_id,
            new = summary.new,
            modified = summary.modified,
            unchanged = summary.unchanged,
            written = written,
            elapsed_ms = report.elapsed_ms,
            "导入完成"
        );
        Ok(report)
    }

    /// 导出当前数据
    ///
    /// # 参数
    /// - format: 导出格式
    /// - date: 文件名中的日期
    #[instrument(skip(self), fields(entity = T::ENTITY.as_str()))]
    pub async fn export<T>(&self, format: ExportFormat, date: NaiveDate) -> ImportResult<ExportFile>
    where
        T: ImportableEntity,
        T::Minimal: SpreadsheetFormatter,
    {
        let config = self.resolve_config()?;
        let snapshot = self.repo.load_snapshot().await?;
        let minimals = export_minimal::<T>(&snapshot)?;

        let bytes = match format {
            ExportFormat::Json => to_json_bytes(&to_json(&minimals, T::schema())?)?,
            ExportFormat::Csv => {
                to_csv_bytes(&<T::Minimal as SpreadsheetFormatter>::to_spreadsheet_rows(&minimals)?)?
            }
        };

        // 前缀带上实体名，同日导出的不同实体互不覆盖
        let prefix = format!("{}_{}", config.export_file_prefix, T::schema().base_name);
        let file_name = export_file_name(&prefix, date, format);
        info!(file_name = %file_name, count = minimals.len(), "导出完成");
        Ok(ExportFile { file_name, bytes })
    }
}
