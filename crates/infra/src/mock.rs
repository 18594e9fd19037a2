//! # テスト用モック
//!
//! ハンドラテストで使用するインメモリのリポジトリと通知送信。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! staffdesk-infra = { workspace = true, features = ["test-utils"] }
//! ```
//!
//! [`MockDepartmentStore`] は 1 つの状態を共有したまま
//! グループ・社員・タスクの 3 リポジトリを実装するため、
//! 登録した社員・タスクがグループの集計にそのまま反映される。

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use staffdesk_domain::{
    application::{Application, ApplicationId},
    employee::{Employee, EmployeeId, NewEmployee},
    group::{GroupId, GroupSummary},
    notification::{EmailMessage, NotificationError},
    task::{NewTask, Task, TaskId},
    update::{Assignment, ColumnValue},
};

use crate::{
    error::InfraError,
    notification::NotificationSender,
    repository::{ApplicationRepository, EmployeeRepository, GroupRepository, TaskRepository},
};

fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

// ===== MockDepartmentStore =====

#[derive(Debug, Clone)]
struct GroupRecord {
    id:          GroupId,
    name:        String,
    description: Option<String>,
    created_at:  Option<NaiveDateTime>,
}

#[derive(Debug, Default)]
struct DepartmentState {
    groups:     Vec<GroupRecord>,
    employees:  Vec<Employee>,
    tasks:      Vec<Task>,
    next_id:    i32,
    writes:     usize,
    fail_reads: bool,
}

impl DepartmentState {
    fn next_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }

    fn group_name(&self, id: Option<GroupId>) -> Option<String> {
        let id = id?;
        self.groups
            .iter()
            .find(|g| g.id == id)
            .map(|g| g.name.clone())
    }

    fn employee_name(&self, id: Option<EmployeeId>) -> Option<String> {
        let id = id?;
        self.employees
            .iter()
            .find(|e| e.id == id)
            .map(|e| e.name.clone())
    }

    fn check_reads(&self) -> Result<(), InfraError> {
        if self.fail_reads {
            return Err(InfraError::unexpected("モック: 読み取り失敗"));
        }
        Ok(())
    }
}

/// グループ・社員・タスクのインメモリストア
#[derive(Clone, Default)]
pub struct MockDepartmentStore {
    state: Arc<Mutex<DepartmentState>>,
}

impl MockDepartmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 読み取りが常に失敗するストア
    pub fn failing() -> Self {
        let store = Self::new();
        store.state.lock().unwrap().fail_reads = true;
        store
    }

    /// グループを追加する（グループの作成は API の外で行われる）
    pub fn add_group(&self, name: &str) -> GroupId {
        let mut state = self.state.lock().unwrap();
        let id = GroupId::from_i32(state.next_id());
        state.groups.push(GroupRecord {
            id,
            name: name.to_string(),
            description: None,
            created_at: Some(now()),
        });
        id
    }

    /// これまでに発行された書き込み文の数
    pub fn write_count(&self) -> usize {
        self.state.lock().unwrap().writes
    }

    /// 保存されているタスクを ID で取得する
    pub fn task(&self, id: TaskId) -> Option<Task> {
        self.state
            .lock()
            .unwrap()
            .tasks
            .iter()
            .find(|t| t.id == id)
            .cloned()
    }

    /// 保存されている社員を ID で取得する
    pub fn employee(&self, id: EmployeeId) -> Option<Employee> {
        self.state
            .lock()
            .unwrap()
            .employees
            .iter()
            .find(|e| e.id == id)
            .cloned()
    }
}

fn text(assignment: &Assignment) -> Option<String> {
    match &assignment.value {
        ColumnValue::Text(value) => value.clone(),
        _ => None,
    }
}

#[async_trait]
impl GroupRepository for MockDepartmentStore {
    async fn find_all_with_counts(&self) -> Result<Vec<GroupSummary>, InfraError> {
        let state = self.state.lock().unwrap();
        state.check_reads()?;

        let mut groups: Vec<GroupSummary> = state
            .groups
            .iter()
            .map(|g| GroupSummary {
                id:             g.id,
                name:           g.name.clone(),
                description:    g.description.clone(),
                created_at:     g.created_at,
                employee_count: state
                    .employees
                    .iter()
                    .filter(|e| e.group_id == Some(g.id))
                    .count() as i64,
                task_count:     state
                    .tasks
                    .iter()
                    .filter(|t| t.group_id == Some(g.id))
                    .count() as i64,
            })
            .collect();
        groups.sort_by_key(|g| g.id);
        Ok(groups)
    }
}

#[async_trait]
impl EmployeeRepository for MockDepartmentStore {
    async fn find_all(&self, group_id: Option<GroupId>) -> Result<Vec<Employee>, InfraError> {
        let state = self.state.lock().unwrap();
        state.check_reads()?;

        let mut employees: Vec<Employee> = state
            .employees
            .iter()
            .filter(|e| group_id.is_none() || e.group_id == group_id)
            .map(|e| Employee {
                group_name: state.group_name(e.group_id),
                ..e.clone()
            })
            .collect();
        // PostgreSQL の昇順と同じく NULL を末尾に置く
        employees.sort_by_key(|e| (e.group_id.is_none(), e.group_id, e.id));
        Ok(employees)
    }

    async fn insert(&self, employee: &NewEmployee) -> Result<EmployeeId, InfraError> {
        let mut state = self.state.lock().unwrap();
        let id = EmployeeId::from_i32(state.next_id());
        state.employees.push(Employee {
            id,
            group_id: employee.group_id,
            name: employee.name.clone(),
            position: employee.position.clone(),
            email: employee.email.clone(),
            phone: employee.phone.clone(),
            status: Some(employee.status().to_string()),
            hired_date: employee.hired_date,
            created_at: Some(now()),
            group_name: None,
        });
        state.writes += 1;
        Ok(id)
    }

    async fn update(&self, id: EmployeeId, assignments: &[Assignment]) -> Result<(), InfraError> {
        if assignments.is_empty() {
            return Ok(());
        }

        let mut state = self.state.lock().unwrap();
        state.writes += 1;
        let Some(employee) = state.employees.iter_mut().find(|e| e.id == id) else {
            return Ok(());
        };

        for assignment in assignments {
            match assignment.column {
                "name" => {
                    employee.name = text(assignment)
                        .ok_or_else(|| InfraError::unexpected("name は NOT NULL"))?;
                }
                "position" => employee.position = text(assignment),
                "email" => employee.email = text(assignment),
                "phone" => employee.phone = text(assignment),
                "status" => employee.status = text(assignment),
                other => {
                    return Err(InfraError::unexpected(format!("未知のカラム: {other}")));
                }
            }
        }
        Ok(())
    }
}

#[async_trait]
impl TaskRepository for MockDepartmentStore {
    async fn find_all(&self, group_id: Option<GroupId>) -> Result<Vec<Task>, InfraError> {
        let state = self.state.lock().unwrap();
        state.check_reads()?;

        let mut tasks: Vec<Task> = state
            .tasks
            .iter()
            .filter(|t| group_id.is_none() || t.group_id == group_id)
            .map(|t| Task {
                employee_name: state.employee_name(t.employee_id),
                group_name: state.group_name(t.group_id),
                ..t.clone()
            })
            .collect();
        match group_id {
            Some(_) => tasks.sort_by_key(|t| std::cmp::Reverse(t.id)),
            None => tasks.sort_by_key(|t| std::cmp::Reverse((t.created_at, t.id))),
        }
        Ok(tasks)
    }

    async fn insert(&self, task: &NewTask) -> Result<TaskId, InfraError> {
        let mut state = self.state.lock().unwrap();
        let id = TaskId::from_i32(state.next_id());
        state.tasks.push(Task {
            id,
            group_id: task.group_id,
            employee_id: task.employee_id,
            title: task.title.clone(),
            description: task.description.clone(),
            status: Some(task.status().to_string()),
            priority: Some(task.priority().to_string()),
            due_date: task.due_date,
            created_at: Some(now()),
            completed_at: None,
            employee_name: None,
            group_name: None,
        });
        state.writes += 1;
        Ok(id)
    }

    async fn update(&self, id: TaskId, assignments: &[Assignment]) -> Result<(), InfraError> {
        if assignments.is_empty() {
            return Ok(());
        }

        let mut state = self.state.lock().unwrap();
        state.writes += 1;
        let Some(task) = state.tasks.iter_mut().find(|t| t.id == id) else {
            return Ok(());
        };

        for assignment in assignments {
            match (assignment.column, &assignment.value) {
                ("status", _) => task.status = text(assignment),
                ("title", _) => {
                    task.title = text(assignment)
                        .ok_or_else(|| InfraError::unexpected("title は NOT NULL"))?;
                }
                ("employee_id", ColumnValue::Integer(value)) => {
                    task.employee_id = value.map(EmployeeId::from_i32);
                }
                ("completed_at", ColumnValue::CurrentTimestamp) => {
                    task.completed_at = Some(now());
                }
                (other, _) => {
                    return Err(InfraError::unexpected(format!("未知のカラム: {other}")));
                }
            }
        }
        Ok(())
    }
}

// ===== MockApplicationRepository =====

#[derive(Clone, Default)]
pub struct MockApplicationRepository {
    applications: Arc<Mutex<Vec<(ApplicationId, Application)>>>,
    fail:         bool,
}

impl MockApplicationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// 保存が常に失敗するリポジトリ
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// 保存された応募
    pub fn saved(&self) -> Vec<(ApplicationId, Application)> {
        self.applications.lock().unwrap().clone()
    }
}

#[async_trait]
impl ApplicationRepository for MockApplicationRepository {
    async fn insert(&self, application: &Application) -> Result<ApplicationId, InfraError> {
        if self.fail {
            return Err(InfraError::unexpected("モック: 書き込み失敗"));
        }

        let mut applications = self.applications.lock().unwrap();
        let id = ApplicationId::from_i32(applications.len() as i32 + 1);
        applications.push((id, application.clone()));
        Ok(id)
    }
}

// ===== MockNotificationSender =====

/// 送信したメールを記録する
#[derive(Clone, Default)]
pub struct RecordingNotificationSender {
    sent: Arc<Mutex<Vec<EmailMessage>>>,
}

impl RecordingNotificationSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// 送信されたメール
    pub fn sent(&self) -> Vec<EmailMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationSender for RecordingNotificationSender {
    async fn send_email(&self, email: &EmailMessage) -> Result<(), NotificationError> {
        self.sent.lock().unwrap().push(email.clone());
        Ok(())
    }
}

/// 常に送信に失敗する
#[derive(Clone, Copy, Default)]
pub struct FailingNotificationSender;

#[async_trait]
impl NotificationSender for FailingNotificationSender {
    async fn send_email(&self, _email: &EmailMessage) -> Result<(), NotificationError> {
        Err(NotificationError::SendFailed(
            "モック: SMTP 送信失敗".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use staffdesk_domain::task::TaskUpdate;

    use super::*;

    #[tokio::test]
    async fn test_登録した社員とタスクがグループの集計に反映される() {
        let store = MockDepartmentStore::new();
        let group_id = store.add_group("Разработка");
        let employee: NewEmployee =
            serde_json::from_value(json!({ "group_id": group_id, "name": "Анна" })).unwrap();
        let task: NewTask =
            serde_json::from_value(json!({ "group_id": group_id, "title": "Отчёт" })).unwrap();

        EmployeeRepository::insert(&store, &employee).await.unwrap();
        TaskRepository::insert(&store, &task).await.unwrap();
        TaskRepository::insert(&store, &task).await.unwrap();

        let groups = store.find_all_with_counts().await.unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].employee_count, 1);
        assert_eq!(groups[0].task_count, 2);
    }

    #[tokio::test]
    async fn test_完了への更新でcompleted_atが埋まる() {
        let store = MockDepartmentStore::new();
        let task: NewTask = serde_json::from_value(json!({ "title": "Отчёт" })).unwrap();
        let id = TaskRepository::insert(&store, &task).await.unwrap();
        let update: TaskUpdate =
            serde_json::from_value(json!({ "id": id, "status": "completed" })).unwrap();

        TaskRepository::update(&store, id, &update.assignments())
            .await
            .unwrap();

        let task = store.task(id).unwrap();
        assert_eq!(task.status.as_deref(), Some("completed"));
        assert!(task.completed_at.is_some());
    }

    #[tokio::test]
    async fn test_空の更新は書き込みを数えない() {
        let store = MockDepartmentStore::new();

        TaskRepository::update(&store, TaskId::from_i32(1), &[])
            .await
            .unwrap();

        assert_eq!(store.write_count(), 0);
    }
}
