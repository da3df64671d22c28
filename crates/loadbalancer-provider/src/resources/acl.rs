use super::read_failed;
use crate::acl::{
    ACTION_KEY, ARGUMENT_KEY, CONDITION_KEY, expand_acl_actions, expand_acl_conditions,
    flatten_acl_actions, flatten_acl_conditions,
};
use crate::error::{ProviderError, Result};
use crate::resource::Resource;
use crate::resource_data::ResourceData;
use crate::schema::{Attribute, Block, ValueType};
use async_trait::async_trait;
use loadbalancer_sdk::{CreateAclRequest, LoadBalancerService, PatchAclRequest};
use serde_json::{Value, json};
use tracing::{debug, info};

const PARENTS: [&str; 2] = ["listener_id", "target_group_id"];

pub struct AclResource;

/// Schema of a condition or action block
fn rule_block() -> Block {
    let argument = Block::new()
        .with_attribute("name", Attribute::required_string())
        .with_attribute("value", Attribute::required_string());

    Block::new()
        .with_attribute("name", Attribute::required_string())
        .with_attribute(
            ARGUMENT_KEY,
            Attribute::required(ValueType::Set).with_elem(argument),
        )
}

fn parent_id(value: Value) -> Option<i64> {
    value.as_i64().filter(|id| *id != 0)
}

#[async_trait]
impl Resource for AclResource {
    fn name(&self) -> &'static str {
        "loadbalancer_acl"
    }

    fn schema(&self) -> Block {
        Block::new()
            .with_attribute(
                "listener_id",
                Attribute::optional_int().force_new().exactly_one_of(&PARENTS),
            )
            .with_attribute(
                "target_group_id",
                Attribute::optional_int().force_new().exactly_one_of(&PARENTS),
            )
            .with_attribute("name", Attribute::optional_string())
            .with_attribute(
                CONDITION_KEY,
                Attribute::required(ValueType::List)
                    .min_items(1)
                    .with_elem(rule_block()),
            )
            .with_attribute(
                ACTION_KEY,
                Attribute::required(ValueType::List)
                    .min_items(1)
                    .with_elem(rule_block()),
            )
    }

    async fn create(
        &self,
        service: &dyn LoadBalancerService,
        data: &mut ResourceData,
    ) -> Result<()> {
        let req = CreateAclRequest {
            name: data.get_string_ok("name")?,
            listener_id: parent_id(data.get("listener_id")?),
            target_group_id: parent_id(data.get("target_group_id")?),
            conditions: expand_acl_conditions(&data.get_list(CONDITION_KEY)?)?,
            actions: expand_acl_actions(&data.get_list(ACTION_KEY)?)?,
        };

        info!(
            listener_id = ?req.listener_id,
            target_group_id = ?req.target_group_id,
            name = ?req.name,
            "Creating ACL"
        );
        debug!(request = ?req, "Built create ACL request");

        let acl_id = service
            .create_acl(&req)
            .await
            .map_err(|e| ProviderError::remote("Error creating ACL", e))?;

        data.set_id(acl_id);

        self.read(service, data).await
    }

    async fn read(&self, service: &dyn LoadBalancerService, data: &mut ResourceData) -> Result<()> {
        let acl_id = data.parse_id()?;

        debug!(acl_id, "Retrieving ACL");

        let acl = match service.get_acl(acl_id).await {
            Ok(acl) => acl,
            Err(e) => return read_failed(data, "ACL", acl_id, e),
        };

        data.set_keys([
            ("listener_id", json!(acl.listener_id)),
            ("target_group_id", json!(acl.target_group_id)),
            ("name", json!(acl.name)),
            (CONDITION_KEY, Value::Array(flatten_acl_conditions(&acl.conditions))),
            (ACTION_KEY, Value::Array(flatten_acl_actions(&acl.actions))),
        ])
    }

    async fn update(
        &self,
        service: &dyn LoadBalancerService,
        data: &mut ResourceData,
    ) -> Result<()> {
        let acl_id = data.parse_id()?;

        let conditions = if data.has_change(CONDITION_KEY)? {
            Some(expand_acl_conditions(&data.get_list(CONDITION_KEY)?)?)
        } else {
            None
        };
        let actions = if data.has_change(ACTION_KEY)? {
            Some(expand_acl_actions(&data.get_list(ACTION_KEY)?)?)
        } else {
            None
        };

        let req = PatchAclRequest {
            name: data.changed_string("name")?,
            conditions,
            actions,
        };

        info!(acl_id, "Updating ACL");
        debug!(request = ?req, "Built patch ACL request");

        service.patch_acl(acl_id, &req).await.map_err(|e| {
            ProviderError::remote(format!("Error updating ACL with ID [{}]", acl_id), e)
        })?;

        self.read(service, data).await
    }

    async fn delete(
        &self,
        service: &dyn LoadBalancerService,
        data: &mut ResourceData,
    ) -> Result<()> {
        let acl_id = data.parse_id()?;

        info!(acl_id, "Removing ACL");

        service.delete_acl(acl_id).await.map_err(|e| {
            ProviderError::remote(format!("Error removing ACL with ID [{}]", acl_id), e)
        })
    }
}
