//! In-memory service used by handler tests

use async_trait::async_trait;
use loadbalancer_sdk::*;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicI64, Ordering};

#[derive(Default)]
pub(crate) struct FakeService {
    pub clusters: Mutex<BTreeMap<i64, Cluster>>,
    pub listeners: Mutex<BTreeMap<i64, Listener>>,
    pub binds: Mutex<BTreeMap<i64, Bind>>,
    pub target_groups: Mutex<BTreeMap<i64, TargetGroup>>,
    pub targets: Mutex<BTreeMap<i64, Target>>,
    pub acls: Mutex<BTreeMap<i64, Acl>>,
    pub certificates: Mutex<BTreeMap<i64, Certificate>>,
    pub access_ips: Mutex<BTreeMap<i64, (i64, AccessIp)>>,
    pub vips: Mutex<BTreeMap<i64, Vip>>,
    /// Serialized body of every create and patch request, in call order
    pub requests: Mutex<Vec<(&'static str, Value)>>,
    /// Error returned by the next call, whatever it is
    pub fail_next: Mutex<Option<LoadBalancerError>>,
    next_id: AtomicI64,
}

impl FakeService {
    pub fn new() -> Self {
        Self {
            next_id: AtomicI64::new(100),
            ..Default::default()
        }
    }

    pub fn fail_next(&self, err: LoadBalancerError) {
        *self.fail_next.lock().unwrap() = Some(err);
    }

    /// The last recorded request body for an operation
    pub fn last_request(&self, operation: &str) -> Option<Value> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(name, _)| *name == operation)
            .map(|(_, body)| body.clone())
    }

    fn check(&self) -> Result<()> {
        match self.fail_next.lock().unwrap().take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn record<T: Serialize>(&self, operation: &'static str, req: &T) {
        let body = serde_json::to_value(req).unwrap();
        self.requests.lock().unwrap().push((operation, body));
    }

    fn id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }
}

fn matches<T: Serialize>(item: &T, params: &ApiRequestParameters) -> bool {
    let value = serde_json::to_value(item).unwrap();
    params.filters.iter().all(|filter| {
        let field = match value.get(&filter.property) {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => return false,
        };
        match filter.operator {
            FilterOperator::Eq => filter.values.iter().any(|v| *v == field),
            FilterOperator::Neq => filter.values.iter().all(|v| *v != field),
            _ => true,
        }
    })
}

fn filtered<'a, T: Clone + Serialize + 'a>(
    items: impl Iterator<Item = &'a T>,
    params: &ApiRequestParameters,
) -> Vec<T> {
    items.filter(|item| matches(*item, params)).cloned().collect()
}

macro_rules! apply {
    ($target:expr, $req:expr, [$($field:ident),* $(,)?]) => {
        $(
            if let Some(value) = $req.$field.clone() {
                $target.$field = value;
            }
        )*
    };
}

#[async_trait]
impl LoadBalancerService for FakeService {
    async fn get_clusters(&self, params: &ApiRequestParameters) -> Result<Vec<Cluster>> {
        self.check()?;
        Ok(filtered(self.clusters.lock().unwrap().values(), params))
    }

    async fn get_cluster(&self, cluster_id: i64) -> Result<Cluster> {
        self.check()?;
        self.clusters
            .lock()
            .unwrap()
            .get(&cluster_id)
            .cloned()
            .ok_or(LoadBalancerError::ClusterNotFound(cluster_id))
    }

    async fn patch_cluster(&self, cluster_id: i64, req: &PatchClusterRequest) -> Result<()> {
        self.check()?;
        self.record("patch_cluster", req);
        let mut clusters = self.clusters.lock().unwrap();
        let cluster = clusters
            .get_mut(&cluster_id)
            .ok_or(LoadBalancerError::ClusterNotFound(cluster_id))?;
        apply!(cluster, req, [name]);
        Ok(())
    }

    async fn get_listeners(&self, params: &ApiRequestParameters) -> Result<Vec<Listener>> {
        self.check()?;
        Ok(filtered(self.listeners.lock().unwrap().values(), params))
    }

    async fn get_listener(&self, listener_id: i64) -> Result<Listener> {
        self.check()?;
        self.listeners
            .lock()
            .unwrap()
            .get(&listener_id)
            .cloned()
            .ok_or(LoadBalancerError::ListenerNotFound(listener_id))
    }

    async fn create_listener(&self, req: &CreateListenerRequest) -> Result<i64> {
        self.check()?;
        self.record("create_listener", req);
        let id = self.id();
        let listener = Listener {
            id,
            name: req.name.clone(),
            cluster_id: req.cluster_id,
            mode: req.mode,
            default_target_group_id: req.default_target_group_id,
            hsts_enabled: req.hsts_enabled,
            hsts_maxage: req.hsts_maxage.unwrap_or(31536000),
            close: req.close,
            redirect_https: req.redirect_https,
            access_is_allow_list: req.access_is_allow_list,
            allow_tlsv1: req.allow_tlsv1,
            allow_tlsv11: req.allow_tlsv11,
            disable_tlsv12: req.disable_tlsv12,
            disable_http2: req.disable_http2,
            http2_only: req.http2_only,
            custom_ciphers: req.custom_ciphers.clone().unwrap_or_default(),
        };
        self.listeners.lock().unwrap().insert(id, listener);
        Ok(id)
    }

    async fn patch_listener(&self, listener_id: i64, req: &PatchListenerRequest) -> Result<()> {
        self.check()?;
        self.record("patch_listener", req);
        let mut listeners = self.listeners.lock().unwrap();
        let listener = listeners
            .get_mut(&listener_id)
            .ok_or(LoadBalancerError::ListenerNotFound(listener_id))?;
        apply!(
            listener,
            req,
            [
                name,
                mode,
                default_target_group_id,
                hsts_enabled,
                hsts_maxage,
                close,
                redirect_https,
                access_is_allow_list,
                allow_tlsv1,
                allow_tlsv11,
                disable_tlsv12,
                disable_http2,
                http2_only,
                custom_ciphers,
            ]
        );
        Ok(())
    }

    async fn delete_listener(&self, listener_id: i64) -> Result<()> {
        self.check()?;
        self.listeners
            .lock()
            .unwrap()
            .remove(&listener_id)
            .map(|_| ())
            .ok_or(LoadBalancerError::ListenerNotFound(listener_id))
    }

    async fn get_listener_binds(
        &self,
        listener_id: i64,
        params: &ApiRequestParameters,
    ) -> Result<Vec<Bind>> {
        self.check()?;
        let binds = self.binds.lock().unwrap();
        Ok(filtered(
            binds.values().filter(|b| b.listener_id == listener_id),
            params,
        ))
    }

    async fn get_listener_bind(&self, listener_id: i64, bind_id: i64) -> Result<Bind> {
        self.check()?;
        self.binds
            .lock()
            .unwrap()
            .get(&bind_id)
            .filter(|b| b.listener_id == listener_id)
            .cloned()
            .ok_or(LoadBalancerError::BindNotFound(bind_id))
    }

    async fn create_listener_bind(&self, listener_id: i64, req: &CreateBindRequest) -> Result<i64> {
        self.check()?;
        self.record("create_listener_bind", req);
        let id = self.id();
        let bind = Bind {
            id,
            listener_id,
            vip_id: req.vip_id,
            port: req.port,
        };
        self.binds.lock().unwrap().insert(id, bind);
        Ok(id)
    }

    async fn patch_listener_bind(
        &self,
        listener_id: i64,
        bind_id: i64,
        req: &PatchBindRequest,
    ) -> Result<()> {
        self.check()?;
        self.record("patch_listener_bind", req);
        let mut binds = self.binds.lock().unwrap();
        let bind = binds
            .get_mut(&bind_id)
            .filter(|b| b.listener_id == listener_id)
            .ok_or(LoadBalancerError::BindNotFound(bind_id))?;
        apply!(bind, req, [vip_id, port]);
        Ok(())
    }

    async fn delete_listener_bind(&self, listener_id: i64, bind_id: i64) -> Result<()> {
        self.check()?;
        let mut binds = self.binds.lock().unwrap();
        match binds.get(&bind_id) {
            Some(bind) if bind.listener_id == listener_id => {
                binds.remove(&bind_id);
                Ok(())
            }
            _ => Err(LoadBalancerError::BindNotFound(bind_id)),
        }
    }

    async fn get_target_groups(&self, params: &ApiRequestParameters) -> Result<Vec<TargetGroup>> {
        self.check()?;
        Ok(filtered(self.target_groups.lock().unwrap().values(), params))
    }

    async fn get_target_group(&self, target_group_id: i64) -> Result<TargetGroup> {
        self.check()?;
        self.target_groups
            .lock()
            .unwrap()
            .get(&target_group_id)
            .cloned()
            .ok_or(LoadBalancerError::TargetGroupNotFound(target_group_id))
    }

    async fn create_target_group(&self, req: &CreateTargetGroupRequest) -> Result<i64> {
        self.check()?;
        self.record("create_target_group", req);
        let id = self.id();
        let target_group = TargetGroup {
            id,
            name: req.name.clone(),
            cluster_id: req.cluster_id,
            balance: req.balance,
            mode: req.mode,
            close: req.close,
            sticky: req.sticky,
            cookie_opts: req.cookie_opts.clone().unwrap_or_default(),
            source: req.source.clone().unwrap_or_default(),
            timeouts_connect: req.timeouts_connect.unwrap_or(5000),
            timeouts_server: req.timeouts_server.unwrap_or(50000),
            custom_options: req.custom_options.clone().unwrap_or_default(),
            monitor_url: req.monitor_url.clone().unwrap_or_default(),
            monitor_method: req.monitor_method,
            monitor_host: req.monitor_host.clone().unwrap_or_default(),
            monitor_http_version: req.monitor_http_version.clone().unwrap_or_default(),
            monitor_expect: req.monitor_expect.clone().unwrap_or_default(),
            monitor_tcp_monitoring: req.monitor_tcp_monitoring,
            check_port: req.check_port.unwrap_or_default(),
            send_proxy: req.send_proxy,
            send_proxy_v2: req.send_proxy_v2,
            ssl: req.ssl,
            ssl_verify: req.ssl_verify,
            sni: req.sni,
        };
        self.target_groups.lock().unwrap().insert(id, target_group);
        Ok(id)
    }

    async fn patch_target_group(
        &self,
        target_group_id: i64,
        req: &PatchTargetGroupRequest,
    ) -> Result<()> {
        self.check()?;
        self.record("patch_target_group", req);
        let mut target_groups = self.target_groups.lock().unwrap();
        let target_group = target_groups
            .get_mut(&target_group_id)
            .ok_or(LoadBalancerError::TargetGroupNotFound(target_group_id))?;
        apply!(
            target_group,
            req,
            [
                name,
                balance,
                mode,
                close,
                sticky,
                cookie_opts,
                source,
                timeouts_connect,
                timeouts_server,
                custom_options,
                monitor_url,
                monitor_host,
                monitor_http_version,
                monitor_expect,
                monitor_tcp_monitoring,
                check_port,
                send_proxy,
                send_proxy_v2,
                ssl,
                ssl_verify,
                sni,
            ]
        );
        if req.monitor_method.is_some() {
            target_group.monitor_method = req.monitor_method;
        }
        Ok(())
    }

    async fn delete_target_group(&self, target_group_id: i64) -> Result<()> {
        self.check()?;
        self.target_groups
            .lock()
            .unwrap()
            .remove(&target_group_id)
            .map(|_| ())
            .ok_or(LoadBalancerError::TargetGroupNotFound(target_group_id))
    }

    async fn get_target_group_targets(
        &self,
        target_group_id: i64,
        params: &ApiRequestParameters,
    ) -> Result<Vec<Target>> {
        self.check()?;
        let targets = self.targets.lock().unwrap();
        Ok(filtered(
            targets
                .values()
                .filter(|t| t.target_group_id == target_group_id),
            params,
        ))
    }

    async fn get_target_group_target(
        &self,
        target_group_id: i64,
        target_id: i64,
    ) -> Result<Target> {
        self.check()?;
        self.targets
            .lock()
            .unwrap()
            .get(&target_id)
            .filter(|t| t.target_group_id == target_group_id)
            .cloned()
            .ok_or(LoadBalancerError::TargetNotFound(target_id))
    }

    async fn create_target_group_target(
        &self,
        target_group_id: i64,
        req: &CreateTargetRequest,
    ) -> Result<i64> {
        self.check()?;
        self.record("create_target_group_target", req);
        let id = self.id();
        let target = Target {
            id,
            target_group_id,
            name: req.name.clone(),
            ip: req.ip.clone(),
            port: req.port,
            weight: req.weight.unwrap_or(1),
            backup: req.backup,
            check_interval: req.check_interval.unwrap_or(2000),
            check_ssl: req.check_ssl,
            check_rise: req.check_rise.unwrap_or(2),
            check_fall: req.check_fall.unwrap_or(3),
            disable_http2: req.disable_http2,
            http2_only: req.http2_only,
            active: req.active,
        };
        self.targets.lock().unwrap().insert(id, target);
        Ok(id)
    }

    async fn patch_target_group_target(
        &self,
        target_group_id: i64,
        target_id: i64,
        req: &PatchTargetRequest,
    ) -> Result<()> {
        self.check()?;
        self.record("patch_target_group_target", req);
        let mut targets = self.targets.lock().unwrap();
        let target = targets
            .get_mut(&target_id)
            .filter(|t| t.target_group_id == target_group_id)
            .ok_or(LoadBalancerError::TargetNotFound(target_id))?;
        apply!(
            target,
            req,
            [
                name,
                ip,
                port,
                weight,
                backup,
                check_interval,
                check_ssl,
                check_rise,
                check_fall,
                disable_http2,
                http2_only,
                active,
            ]
        );
        Ok(())
    }

    async fn delete_target_group_target(
        &self,
        target_group_id: i64,
        target_id: i64,
    ) -> Result<()> {
        self.check()?;
        let mut targets = self.targets.lock().unwrap();
        match targets.get(&target_id) {
            Some(target) if target.target_group_id == target_group_id => {
                targets.remove(&target_id);
                Ok(())
            }
            _ => Err(LoadBalancerError::TargetNotFound(target_id)),
        }
    }

    async fn get_listener_acls(
        &self,
        listener_id: i64,
        params: &ApiRequestParameters,
    ) -> Result<Vec<Acl>> {
        self.check()?;
        let acls = self.acls.lock().unwrap();
        Ok(filtered(
            acls.values().filter(|a| a.listener_id == Some(listener_id)),
            params,
        ))
    }

    async fn get_target_group_acls(
        &self,
        target_group_id: i64,
        params: &ApiRequestParameters,
    ) -> Result<Vec<Acl>> {
        self.check()?;
        let acls = self.acls.lock().unwrap();
        Ok(filtered(
            acls.values()
                .filter(|a| a.target_group_id == Some(target_group_id)),
            params,
        ))
    }

    async fn get_acl(&self, acl_id: i64) -> Result<Acl> {
        self.check()?;
        self.acls
            .lock()
            .unwrap()
            .get(&acl_id)
            .cloned()
            .ok_or(LoadBalancerError::AclNotFound(acl_id))
    }

    async fn create_acl(&self, req: &CreateAclRequest) -> Result<i64> {
        self.check()?;
        self.record("create_acl", req);
        let id = self.id();
        let acl = Acl {
            id,
            name: req.name.clone().unwrap_or_default(),
            listener_id: req.listener_id,
            target_group_id: req.target_group_id,
            conditions: req.conditions.clone(),
            actions: req.actions.clone(),
        };
        self.acls.lock().unwrap().insert(id, acl);
        Ok(id)
    }

    async fn patch_acl(&self, acl_id: i64, req: &PatchAclRequest) -> Result<()> {
        self.check()?;
        self.record("patch_acl", req);
        let mut acls = self.acls.lock().unwrap();
        let acl = acls
            .get_mut(&acl_id)
            .ok_or(LoadBalancerError::AclNotFound(acl_id))?;
        apply!(acl, req, [name, conditions, actions]);
        Ok(())
    }

    async fn delete_acl(&self, acl_id: i64) -> Result<()> {
        self.check()?;
        self.acls
            .lock()
            .unwrap()
            .remove(&acl_id)
            .map(|_| ())
            .ok_or(LoadBalancerError::AclNotFound(acl_id))
    }

    async fn get_listener_certificates(
        &self,
        listener_id: i64,
        params: &ApiRequestParameters,
    ) -> Result<Vec<Certificate>> {
        self.check()?;
        let certificates = self.certificates.lock().unwrap();
        Ok(filtered(
            certificates
                .values()
                .filter(|c| c.listener_id == listener_id),
            params,
        ))
    }

    async fn get_listener_certificate(
        &self,
        listener_id: i64,
        certificate_id: i64,
    ) -> Result<Certificate> {
        self.check()?;
        self.certificates
            .lock()
            .unwrap()
            .get(&certificate_id)
            .filter(|c| c.listener_id == listener_id)
            .cloned()
            .ok_or(LoadBalancerError::CertificateNotFound(certificate_id))
    }

    async fn create_listener_certificate(
        &self,
        listener_id: i64,
        req: &CreateCertificateRequest,
    ) -> Result<i64> {
        self.check()?;
        self.record("create_listener_certificate", req);
        let id = self.id();
        let certificate = Certificate {
            id,
            listener_id,
            name: req.name.clone(),
        };
        self.certificates.lock().unwrap().insert(id, certificate);
        Ok(id)
    }

    async fn patch_listener_certificate(
        &self,
        listener_id: i64,
        certificate_id: i64,
        req: &PatchCertificateRequest,
    ) -> Result<()> {
        self.check()?;
        self.record("patch_listener_certificate", req);
        let mut certificates = self.certificates.lock().unwrap();
        let certificate = certificates
            .get_mut(&certificate_id)
            .filter(|c| c.listener_id == listener_id)
            .ok_or(LoadBalancerError::CertificateNotFound(certificate_id))?;
        apply!(certificate, req, [name]);
        Ok(())
    }

    async fn delete_listener_certificate(
        &self,
        listener_id: i64,
        certificate_id: i64,
    ) -> Result<()> {
        self.check()?;
        let mut certificates = self.certificates.lock().unwrap();
        match certificates.get(&certificate_id) {
            Some(certificate) if certificate.listener_id == listener_id => {
                certificates.remove(&certificate_id);
                Ok(())
            }
            _ => Err(LoadBalancerError::CertificateNotFound(certificate_id)),
        }
    }

    async fn get_listener_access_ips(
        &self,
        listener_id: i64,
        params: &ApiRequestParameters,
    ) -> Result<Vec<AccessIp>> {
        self.check()?;
        let access_ips = self.access_ips.lock().unwrap();
        Ok(filtered(
            access_ips
                .values()
                .filter(|(listener, _)| *listener == listener_id)
                .map(|(_, access_ip)| access_ip),
            params,
        ))
    }

    async fn get_access_ip(&self, access_ip_id: i64) -> Result<AccessIp> {
        self.check()?;
        self.access_ips
            .lock()
            .unwrap()
            .get(&access_ip_id)
            .map(|(_, access_ip)| access_ip.clone())
            .ok_or(LoadBalancerError::AccessIpNotFound(access_ip_id))
    }

    async fn create_listener_access_ip(
        &self,
        listener_id: i64,
        req: &CreateAccessIpRequest,
    ) -> Result<i64> {
        self.check()?;
        self.record("create_listener_access_ip", req);
        let id = self.id();
        let access_ip = AccessIp {
            id,
            ip: req.ip.clone(),
        };
        self.access_ips
            .lock()
            .unwrap()
            .insert(id, (listener_id, access_ip));
        Ok(id)
    }

    async fn patch_access_ip(&self, access_ip_id: i64, req: &PatchAccessIpRequest) -> Result<()> {
        self.check()?;
        self.record("patch_access_ip", req);
        let mut access_ips = self.access_ips.lock().unwrap();
        let (_, access_ip) = access_ips
            .get_mut(&access_ip_id)
            .ok_or(LoadBalancerError::AccessIpNotFound(access_ip_id))?;
        apply!(access_ip, req, [ip]);
        Ok(())
    }

    async fn delete_access_ip(&self, access_ip_id: i64) -> Result<()> {
        self.check()?;
        self.access_ips
            .lock()
            .unwrap()
            .remove(&access_ip_id)
            .map(|_| ())
            .ok_or(LoadBalancerError::AccessIpNotFound(access_ip_id))
    }

    async fn get_vips(&self, params: &ApiRequestParameters) -> Result<Vec<Vip>> {
        self.check()?;
        Ok(filtered(self.vips.lock().unwrap().values(), params))
    }

    async fn get_vip(&self, vip_id: i64) -> Result<Vip> {
        self.check()?;
        self.vips
            .lock()
            .unwrap()
            .get(&vip_id)
            .cloned()
            .ok_or(LoadBalancerError::VipNotFound(vip_id))
    }
}

/// Build a JSON object map from a `json!` literal
pub(crate) fn object(value: Value) -> serde_json::Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {}", other),
    }
}
